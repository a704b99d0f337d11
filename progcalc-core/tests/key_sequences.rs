//! End-to-end key sequences driven through key scripts.

use progcalc_core::{Base, Calculator, CalcConfig, Mode};

fn run(script: &str) -> Calculator {
    let mut calc = Calculator::new();
    calc.run_script(script).expect("script should parse");
    calc
}

fn run_programmer(base: Base, script: &str) -> Calculator {
    let mut calc = Calculator::with_config(&CalcConfig {
        mode: Mode::Programmer,
        base,
    });
    calc.run_script(script).expect("script should parse");
    calc
}

#[test]
fn test_chained_arithmetic_has_no_precedence() {
    assert_eq!(run("2 + 3 × 4 =").display(), "20");
    assert_eq!(run("10 - 4 / 3 =").display(), "2");
}

#[test]
fn test_division_by_zero_shows_zero() {
    assert_eq!(run("5 ÷ 0 =").display(), "0");
    assert_eq!(run("5 / 0 + 7 =").display(), "7");
}

#[test]
fn test_fractions_in_standard_mode() {
    assert_eq!(run("1 . 5 + 2.25 =").display(), "3.75");
    assert_eq!(run("1 / 4 =").display(), "0.25");
}

#[test]
fn test_bitwise_and_chain() {
    assert_eq!(run("PROG 12 AND 10 =").display(), "8");
    assert_eq!(run("PROG 12 AND 10 OR 1 XOR 3 =").display(), "10");
}

#[test]
fn test_shift_operators() {
    assert_eq!(run_programmer(Base::Hex, "1 << 8 =").display(), "100");
    assert_eq!(run_programmer(Base::Dec, "256 >> 4 =").display(), "16");
    assert_eq!(
        run_programmer(Base::Dec, "1 << 99 =").display(),
        i64::MIN.to_string()
    );
}

#[test]
fn test_base_change_preserves_value() {
    let mut calc = run_programmer(Base::Dec, "255");
    calc.run_script("HEX").unwrap();
    assert_eq!(calc.display(), "FF");
    calc.run_script("DEC").unwrap();
    assert_eq!(calc.display(), "255");
}

#[test]
fn test_in_flight_operation_survives_base_change() {
    let calc = run_programmer(Base::Hex, "F0 OR BIN 1111 HEX =");
    assert_eq!(calc.display(), "FF");
}

#[test]
fn test_digit_rejection_in_bin() {
    let calc = run_programmer(Base::Bin, "1 5 0 9");
    assert_eq!(calc.display(), "10");
}

#[test]
fn test_hex_letters_outside_hex_are_ignored() {
    assert_eq!(run_programmer(Base::Dec, "1 A 2").display(), "12");
    assert_eq!(run("ABC").display(), "0");
}

#[test]
fn test_negative_in_non_decimal_bases() {
    let calc = run_programmer(Base::Dec, "3 - 5 =");
    assert_eq!(calc.display(), "-2");

    let views = calc.snapshot().views.unwrap();
    assert_eq!(views.hex, "FFFF FFFE");
    assert_eq!(views.oct, "37 777 777 776");
    assert_eq!(views.bin, "1111 1111 1111 1111 1111 1111 1111 1110");
}

#[test]
fn test_values_beyond_32_bits() {
    // -2^31 - 1 wraps when shown in HEX
    let mut calc = run_programmer(Base::Dec, "0 - 2147483649 =");
    calc.run_script("HEX").unwrap();
    assert_eq!(calc.display(), "7FFF FFFF");

    // Large positive values keep their full width
    let mut calc = run_programmer(Base::Dec, "4294967296");
    calc.run_script("HEX").unwrap();
    assert_eq!(calc.display(), "1 0000 0000");
}

#[test]
fn test_not_then_binary_operator() {
    assert_eq!(run_programmer(Base::Dec, "0 NOT + 1 =").display(), "0");
    assert_eq!(run_programmer(Base::Hex, "NOT").display(), "FFFF FFFF");
}

#[test]
fn test_mode_switch_keeps_invalid_display() {
    let mut calc = run("9.5");
    calc.run_script("PROG BIN").unwrap();
    // Re-read under DEC first, which keeps the integer prefix
    assert_eq!(calc.display(), "1001");

    let mut calc = run("9.5 BIN PROG");
    assert_eq!(calc.display(), "9.5");
    calc.run_script("1").unwrap();
    assert_eq!(calc.display(), "0");
}

#[test]
fn test_clear_after_anything() {
    for script in ["2 + 3 ×", "PROG HEX FF AND", "9 . 5", "PROG 1 NOT"] {
        let mut calc = run(script);
        calc.run_script("CLR").unwrap();
        let state = calc.state();
        assert_eq!(state.display(), "0", "after {script}");
        assert_eq!(state.previous_value(), None, "after {script}");
        assert_eq!(state.pending_operator(), None, "after {script}");
        assert!(!state.awaiting_operand(), "after {script}");
    }
}
