//! Randomised checks of the numeral engine

use num_traits::Signed;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{compute, convert, normalize, parse, Error, FormatOptions, Operator, Radix};

const CASES: usize = 200;

fn rng() -> StdRng {
    StdRng::seed_from_u64(0x6e75_6d65_7261)
}

fn random_radix(rng: &mut impl Rng) -> Radix {
    Radix::new(rng.gen_range(Radix::MIN..=Radix::MAX)).unwrap()
}

fn random_digits(rng: &mut impl Rng, radix: Radix, len: usize) -> String {
    (0..len)
        .map(|_| radix.digit_char(rng.gen_range(0..radix.get())))
        .collect()
}

/// An integer literal, possibly signed and zero-padded
fn random_integer(rng: &mut impl Rng, radix: Radix) -> String {
    let len = rng.gen_range(1..=24);
    let sign = if rng.gen_bool(0.3) { "-" } else { "" };
    format!("{}{}", sign, random_digits(rng, radix, len))
}

/// A literal whose fractional part fits within the default precision
fn random_literal(rng: &mut impl Rng, radix: Radix) -> String {
    let frac_len = rng.gen_range(0..=10);
    let integer = random_integer(rng, radix);
    if frac_len == 0 {
        integer
    } else {
        format!("{}.{}", integer, random_digits(rng, radix, frac_len))
    }
}

/// Reference normalisation done on the text alone
fn strip(literal: &str) -> String {
    let (negative, body) = match literal.strip_prefix('-') {
        Some(body) => (true, body),
        None => (false, literal),
    };
    let (integer, fraction) = body.split_once('.').unwrap_or((body, ""));
    let integer = integer.trim_start_matches('0');
    let integer = if integer.is_empty() { "0" } else { integer };
    let fraction = fraction.trim_end_matches('0');

    let mut out = String::new();
    if negative && !(integer == "0" && fraction.is_empty()) {
        out.push('-');
    }
    out.push_str(integer);
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

#[test]
fn test_parse_then_format_reproduces_normalized_literal() {
    let mut rng = rng();
    let options = FormatOptions::default();
    for _ in 0..CASES {
        let radix = random_radix(&mut rng);
        let literal = random_literal(&mut rng, radix);
        assert_eq!(
            normalize(&literal, radix, &options).unwrap(),
            strip(&literal),
            "{} in base {}",
            literal,
            radix
        );
    }
}

#[test]
fn test_converting_to_own_base_is_normalization() {
    let mut rng = rng();
    let options = FormatOptions::default();
    for _ in 0..CASES {
        let radix = random_radix(&mut rng);
        let literal = random_literal(&mut rng, radix);
        assert_eq!(
            convert(&literal, radix, radix, &options).unwrap(),
            strip(&literal)
        );
    }
}

#[test]
fn test_integer_conversion_round_trips_exactly() {
    let mut rng = rng();
    let options = FormatOptions::default();
    for _ in 0..CASES {
        let from = random_radix(&mut rng);
        let to = random_radix(&mut rng);
        let literal = random_integer(&mut rng, from);
        let there = convert(&literal, from, to, &options).unwrap();
        let back = convert(&there, to, from, &options).unwrap();
        assert_eq!(back, strip(&literal), "{} via base {}", literal, to);
    }
}

#[test]
fn test_fractional_conversion_round_trips_within_precision() {
    let mut rng = rng();
    let options = FormatOptions::default();
    for _ in 0..CASES {
        let from = random_radix(&mut rng);
        let to = random_radix(&mut rng);
        let literal = random_literal(&mut rng, from);
        let there = convert(&literal, from, to, &options).unwrap();
        let back = convert(&there, to, from, &options).unwrap();

        let original = parse(&literal, from).unwrap().into_ratio();
        let returned = parse(&back, from).unwrap().into_ratio();
        let error = (original - returned).abs();

        // Two truncations: at most one unit in the last place of each base
        let tolerance = num_rational::BigRational::new(
            2.into(),
            num_bigint::BigInt::from(from.get().min(to.get())).pow(options.precision),
        );
        assert!(
            error <= tolerance,
            "{} (base {}) -> {} (base {}) -> {}",
            literal,
            from,
            there,
            to,
            back
        );
    }
}

#[test]
fn test_division_fails_exactly_for_zero_divisor() {
    let mut rng = rng();
    let options = FormatOptions::default();
    for _ in 0..CASES {
        let radix = random_radix(&mut rng);
        let a = random_literal(&mut rng, radix);
        let b = if rng.gen_bool(0.3) {
            format!("{}.{}", "0".repeat(rng.gen_range(1..4)), "0".repeat(rng.gen_range(0..4)))
        } else {
            random_literal(&mut rng, radix)
        };
        let divisor_is_zero = parse(&b, radix).unwrap().is_zero();
        let result = compute(&a, &b, radix, Operator::Div, &options);
        assert_eq!(
            result == Err(Error::DivisionByZero),
            divisor_is_zero,
            "{} / {} in base {}",
            a,
            b,
            radix
        );
    }
}

#[test]
fn test_additive_identities_hold_in_every_base() {
    let mut rng = rng();
    let options = FormatOptions::default();
    for _ in 0..CASES {
        let radix = random_radix(&mut rng);
        let a = random_literal(&mut rng, radix);
        assert_eq!(
            compute(&a, "0", radix, Operator::Add, &options).unwrap(),
            strip(&a)
        );
        assert_eq!(compute(&a, &a, radix, Operator::Sub, &options).unwrap(), "0");
    }
}
