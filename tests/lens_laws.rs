//! Property-based tests for lens laws.
//!
//! Every lens kind must satisfy, for hosts where the focused value exists:
//!
//! - **GetPut Law**: `lens.set(host, lens.apply(&host)) == Ok(host)`
//! - **PutGet Law**: `lens.apply(&lens.set(host, value)?) == Some(value)`
//! - **PutPut Law**: `lens.set(lens.set(host, v1)?, v2) == lens.set(host, v2)`

#![cfg(feature = "containers")]

use std::collections::BTreeMap;

use lenskit::prelude::*;
use proptest::prelude::*;

// =============================================================================
// Test Structures
// =============================================================================

#[derive(Clone, PartialEq, Debug)]
struct Point {
    x: i32,
    y: i32,
}

#[derive(Clone, PartialEq, Debug)]
struct Address {
    street: String,
    city: String,
}

#[derive(Clone, PartialEq, Debug)]
struct Person {
    name: String,
    address: Address,
}

#[derive(Clone, PartialEq, Debug)]
struct Scores {
    values: Vec<i32>,
}

#[derive(Clone, PartialEq, Debug)]
struct Stock {
    counts: BTreeMap<String, i32>,
}

#[derive(Clone, PartialEq, Debug)]
struct Reading {
    sample: Option<i32>,
    parsed: Result<i32, String>,
}

// =============================================================================
// Lenses
// =============================================================================

fn x_lens() -> ObjectLens<Point, i32> {
    ObjectLens::new(|point: &Point| point.x, |point: Point, x| Point { x, ..point })
}

fn city_lens() -> StringLens<Person> {
    let address: ObjectLens<Person, Address> = ObjectLens::new(
        |person: &Person| person.address.clone(),
        |person: Person, address| Person { address, ..person },
    );
    address.field(
        |address: &Address| address.city.clone(),
        |address: Address, city| Address { city, ..address },
    )
}

fn values_lens() -> ListLens<Scores, Vec<i32>, IntegerLens<Scores>> {
    ListLens::new(|scores: &Scores| scores.values.clone(), |_, values| Scores { values })
}

fn counts_lens() -> MapLens<Stock, BTreeMap<String, i32>, StringAccess<Stock>, IntegerLens<Stock>> {
    MapLens::new(|stock: &Stock| stock.counts.clone(), |_, counts| Stock { counts })
}

fn pair_lens() -> Tuple2Lens<(i32, String), i32, String, IntegerLens<(i32, String)>, StringLens<(i32, String)>> {
    lenskit::lens::identity()
}

fn sample_lens() -> OptionalLens<Reading, i32, IntegerLens<Reading>> {
    OptionalLens::new(|reading: &Reading| reading.sample, |reading: Reading, sample| Reading { sample, ..reading })
}

fn parsed_lens() -> ResultLens<Reading, i32, String, IntegerLens<Reading>> {
    ResultLens::new(
        |reading: &Reading| reading.parsed.clone(),
        |reading: Reading, parsed| Reading { parsed, ..reading },
    )
}

// =============================================================================
// Strategies
// =============================================================================

fn person_strategy() -> impl Strategy<Value = Person> {
    ("[a-z]{0,8}", "[a-z]{0,8}", "[a-z]{0,8}").prop_map(|(name, street, city)| Person {
        name,
        address: Address { street, city },
    })
}

fn scores_with_index() -> impl Strategy<Value = (Scores, usize)> {
    prop::collection::vec(any::<i32>(), 1..16).prop_flat_map(|values| {
        let length = values.len();
        (Just(Scores { values }), 0..length)
    })
}

fn stock_with_key() -> impl Strategy<Value = (Stock, String)> {
    prop::collection::btree_map("[a-d]{1,2}", any::<i32>(), 1..8).prop_flat_map(|counts| {
        let keys: Vec<String> = counts.keys().cloned().collect();
        (Just(Stock { counts }), prop::sample::select(keys))
    })
}

fn reading_strategy() -> impl Strategy<Value = Reading> {
    (any::<i32>(), any::<i32>()).prop_map(|(sample, parsed)| Reading {
        sample: Some(sample),
        parsed: Ok(parsed),
    })
}

// =============================================================================
// Field and Composed Lenses
// =============================================================================

proptest! {
    #[test]
    fn prop_field_get_put_law(x in any::<i32>(), y in any::<i32>()) {
        let point = Point { x, y };
        let value = x_lens().apply(&point).unwrap();
        prop_assert_eq!(x_lens().set(point.clone(), value), Ok(point));
    }

    #[test]
    fn prop_field_put_get_law(x in any::<i32>(), y in any::<i32>(), value in any::<i32>()) {
        let updated = x_lens().set(Point { x, y }, value).unwrap();
        prop_assert_eq!(x_lens().apply(&updated), Some(value));
        prop_assert_eq!(updated.y, y);
    }

    #[test]
    fn prop_field_put_put_law(x in any::<i32>(), y in any::<i32>(), first in any::<i32>(), second in any::<i32>()) {
        let point = Point { x, y };
        let left = x_lens().set(x_lens().set(point.clone(), first).unwrap(), second);
        prop_assert_eq!(left, x_lens().set(point, second));
    }

    #[test]
    fn prop_composed_get_put_law(person in person_strategy()) {
        let value = city_lens().apply(&person).unwrap();
        prop_assert_eq!(city_lens().set(person.clone(), value), Ok(person));
    }

    #[test]
    fn prop_composed_put_get_law(person in person_strategy(), city in "[a-z]{0,8}") {
        let updated = city_lens().set(person.clone(), city.clone()).unwrap();
        prop_assert_eq!(city_lens().apply(&updated), Some(city));
        prop_assert_eq!(updated.name, person.name);
        prop_assert_eq!(updated.address.street, person.address.street);
    }

    #[test]
    fn prop_composed_put_put_law(person in person_strategy(), first in "[a-z]{0,8}", second in "[a-z]{0,8}") {
        let left = city_lens().set(city_lens().set(person.clone(), first).unwrap(), second.clone());
        prop_assert_eq!(left, city_lens().set(person, second));
    }
}

// =============================================================================
// Container Element Lenses
// =============================================================================

proptest! {
    #[test]
    fn prop_list_element_laws((scores, index) in scores_with_index(), first in any::<i32>(), second in any::<i32>()) {
        let element = values_lens().at(index);

        let current = element.apply(&scores).unwrap();
        prop_assert_eq!(element.set(scores.clone(), current), Ok(scores.clone()));

        let updated = element.set(scores.clone(), first).unwrap();
        prop_assert_eq!(element.apply(&updated), Some(first));
        prop_assert_eq!(updated.values.len(), scores.values.len());

        let twice = element.set(updated, second);
        prop_assert_eq!(twice, element.set(scores, second));
    }

    #[test]
    fn prop_map_value_laws((stock, key) in stock_with_key(), first in any::<i32>(), second in any::<i32>()) {
        let value = counts_lens().get(key);

        let current = value.apply(&stock).unwrap();
        prop_assert_eq!(value.set(stock.clone(), current), Ok(stock.clone()));

        let updated = value.set(stock.clone(), first).unwrap();
        prop_assert_eq!(value.apply(&updated), Some(first));
        prop_assert_eq!(updated.counts.len(), stock.counts.len());

        let twice = value.set(updated, second);
        prop_assert_eq!(twice, value.set(stock, second));
    }

    #[test]
    fn prop_tuple_slot_laws(left in any::<i32>(), right in "[a-z]{0,6}", value in any::<i32>(), other in any::<i32>()) {
        let slot = pair_lens().first();
        let pair = (left, right.clone());

        prop_assert_eq!(slot.set(pair.clone(), left), Ok(pair.clone()));
        prop_assert_eq!(slot.set(pair.clone(), value), Ok((value, right)));

        let twice = slot.set(slot.set(pair.clone(), value).unwrap(), other);
        prop_assert_eq!(twice, slot.set(pair, other));
    }

    #[test]
    fn prop_option_and_result_value_laws(reading in reading_strategy(), value in any::<i32>(), other in any::<i32>()) {
        let sample = sample_lens().get();
        let current = sample.apply(&reading).unwrap();
        prop_assert_eq!(sample.set(reading.clone(), current), Ok(reading.clone()));
        prop_assert_eq!(sample.apply(&sample.set(reading.clone(), value).unwrap()), Some(value));
        prop_assert_eq!(
            sample.set(sample.set(reading.clone(), value).unwrap(), other),
            sample.set(reading.clone(), other)
        );

        let parsed = parsed_lens().get();
        let current = parsed.apply(&reading).unwrap();
        prop_assert_eq!(parsed.set(reading.clone(), current), Ok(reading.clone()));
        prop_assert_eq!(parsed.apply(&parsed.set(reading.clone(), value).unwrap()), Some(value));
        prop_assert_eq!(
            parsed.set(parsed.set(reading.clone(), value).unwrap(), other),
            parsed.set(reading, other)
        );
    }
}
