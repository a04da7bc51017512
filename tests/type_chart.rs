use duel_engine::data::type_chart::{effectiveness, single_multiplier, Effectiveness, ElementType};
use proptest::prelude::*;

use ElementType::*;

#[test]
fn single_type_matchups() {
    assert_eq!(effectiveness(Fire, &[Grass]), Effectiveness::Double);
    assert_eq!(effectiveness(Water, &[Fire]), Effectiveness::Double);
    assert_eq!(effectiveness(Fire, &[Water]), Effectiveness::Half);
    assert_eq!(effectiveness(Normal, &[Normal]), Effectiveness::Neutral);
    assert_eq!(effectiveness(Electric, &[Ground]), Effectiveness::Immune);
    assert_eq!(effectiveness(Normal, &[Ghost]), Effectiveness::Immune);
    assert_eq!(effectiveness(Dragon, &[Fairy]), Effectiveness::Immune);
}

#[test]
fn dual_type_matchups_multiply() {
    assert_eq!(effectiveness(Grass, &[Water, Ground]), Effectiveness::Quadruple);
    assert_eq!(effectiveness(Electric, &[Water, Flying]), Effectiveness::Quadruple);
    assert_eq!(effectiveness(Fire, &[Water, Rock]), Effectiveness::Quarter);
    assert_eq!(effectiveness(Fire, &[Water, Grass]), Effectiveness::Neutral);
}

#[test]
fn immunity_dominates_a_weakness() {
    // Fighting is super effective on Normal but Ghost cancels it.
    assert_eq!(effectiveness(Fighting, &[Normal, Ghost]), Effectiveness::Immune);
    assert_eq!(effectiveness(Ground, &[Fire, Flying]), Effectiveness::Immune);
}

#[test]
fn duplicate_defending_type_counts_once() {
    assert_eq!(effectiveness(Fire, &[Grass, Grass]), Effectiveness::Double);
}

#[test]
fn parses_type_names() {
    assert_eq!("fire".parse::<ElementType>().unwrap(), Fire);
    assert_eq!("Psychic".parse::<ElementType>().unwrap(), Psychic);
    assert!("shadow".parse::<ElementType>().is_err());
}

#[test]
fn effectiveness_is_ordered_by_multiplier() {
    let mut all = vec![
        Effectiveness::Double,
        Effectiveness::Immune,
        Effectiveness::Quadruple,
        Effectiveness::Half,
        Effectiveness::Neutral,
        Effectiveness::Quarter,
    ];
    all.sort();
    let multipliers: Vec<f64> = all.iter().map(|e| e.multiplier()).collect();
    assert_eq!(multipliers, vec![0.0, 0.25, 0.5, 1.0, 2.0, 4.0]);
}

fn any_type() -> impl Strategy<Value = ElementType> {
    prop::sample::select(ElementType::ALL.to_vec())
}

proptest! {
    #[test]
    fn combined_value_is_the_product_of_rows(a in any_type(), d1 in any_type(), d2 in any_type()) {
        prop_assume!(d1 != d2);
        let product = single_multiplier(a, d1) * single_multiplier(a, d2);
        let combined = effectiveness(a, &[d1, d2]).multiplier();
        prop_assert_eq!(combined, product);
        prop_assert!([0.0, 0.25, 0.5, 1.0, 2.0, 4.0].contains(&combined));
    }

    #[test]
    fn zero_from_either_type_is_immune(a in any_type(), d1 in any_type(), d2 in any_type()) {
        let zero = single_multiplier(a, d1) == 0.0 || single_multiplier(a, d2) == 0.0;
        prop_assert_eq!(effectiveness(a, &[d1, d2]).is_immune(), zero);
    }
}
