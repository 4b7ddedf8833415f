//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use super::*;
use crate::reduce::Reduction;

#[test]
fn no_by_uses_a_single_default_band() {
    let mut stack: BandStack<u8> = BandStack::new(4, 4);
    let band = stack.band_index(DEFAULT_BAND_KEY);
    assert_eq!(band, 0);
    let band_again = stack.band_index(DEFAULT_BAND_KEY);
    assert_eq!(band_again, 0);
    assert_eq!(stack.bands().len(), 1);
}

#[test]
fn band_order_is_first_appearance_order() {
    let mut stack: BandStack<u8> = BandStack::new(4, 4);
    stack.band_index("b");
    stack.band_index("a");
    stack.band_index("b");
    stack.band_index("c");
    assert_eq!(stack.band_keys(), vec!["b".to_string(), "a".to_string(), "c".to_string()]);
}

#[test]
fn update_writes_into_the_correct_band_and_pixel() {
    let mut stack: BandStack<u8> = BandStack::new(3, 3);
    let band = stack.band_index("x");
    stack.update(band, 1, 2, 9, Reduction::Last);
    let idx = 1 * 3 + 2;
    match stack.bands()[band].cells()[idx] {
        crate::reduce::Cell::Set(v) => assert_eq!(v, 9),
        crate::reduce::Cell::Unset => panic!("expected a written cell"),
    }
}

#[test]
fn merge_from_combines_same_keyed_bands_by_reduction() {
    let mut a: BandStack<u32> = BandStack::new(2, 1);
    let band_a = a.band_index("g");
    a.update(band_a, 0, 0, 3, Reduction::Sum);

    let mut b: BandStack<u32> = BandStack::new(2, 1);
    let band_b = b.band_index("g");
    b.update(band_b, 0, 0, 4, Reduction::Sum);

    a.merge_from(b, Reduction::Sum);
    assert_eq!(a.band_keys(), vec!["g".to_string()]);
    match a.bands()[0].cells()[0] {
        crate::reduce::Cell::Set(v) => assert_eq!(v, 7),
        crate::reduce::Cell::Unset => panic!("expected a written cell"),
    }
}

#[test]
fn merge_from_appends_bands_with_new_keys_in_the_order_seen() {
    let mut a: BandStack<u32> = BandStack::new(1, 1);
    a.band_index("first");

    let mut b: BandStack<u32> = BandStack::new(1, 1);
    b.band_index("second");

    a.merge_from(b, Reduction::Sum);
    assert_eq!(a.band_keys(), vec!["first".to_string(), "second".to_string()]);
}
