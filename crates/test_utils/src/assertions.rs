//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::Money;
use domain_claims::CalculationResult;
use rust_decimal::Decimal;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more
/// than tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(
        money.is_zero(),
        "Expected zero money, got {} {}",
        money.currency().symbol(),
        money.amount()
    );
}

/// Asserts that money values sum to a total
///
/// # Panics
///
/// Panics if the sum doesn't equal the total
pub fn assert_money_sum_equals(parts: &[Money], total: &Money) {
    let sum = parts.iter().fold(Money::zero(total.currency()), |acc, m| {
        acc.checked_add(m).expect("Currency mismatch in sum")
    });

    assert_eq!(
        sum.amount(),
        total.amount(),
        "Sum of parts ({}) doesn't equal total ({})",
        sum.amount(),
        total.amount()
    );
}

/// Asserts the conservation invariants of a calculation result
///
/// Checks that the covered and rejected totals split the billed total
/// exactly, and that the approved amount plus the patient responsibility
/// adds back to it.
pub fn assert_conservation(result: &CalculationResult) {
    assert_eq!(
        (result.total_covered() + result.total_rejected()).amount(),
        result.total_billed().amount(),
        "covered + rejected must equal billed"
    );
    assert_eq!(
        (result.approved_amount() + result.patient_responsibility()).amount(),
        result.total_billed().amount(),
        "approved + patient responsibility must equal billed"
    );
}

/// Asserts that a decimal value is approximately equal to another
pub fn assert_decimal_approx_eq(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "Decimals differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Asserts that a result is Ok and returns the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Asserts that a result is Err and returns the error
#[macro_export]
macro_rules! assert_err {
    ($result:expr) => {
        match $result {
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => e,
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => panic!("{}: got Ok({:?})", $msg, value),
            Err(e) => e,
        }
    };
}

/// Asserts that an error matches a specific variant
#[macro_export]
macro_rules! assert_err_variant {
    ($result:expr, $pattern:pat) => {
        match $result {
            Ok(value) => panic!(
                "Expected Err matching {}, got Ok({:?})",
                stringify!($pattern),
                value
            ),
            Err(ref e) => {
                assert!(
                    matches!(e, $pattern),
                    "Error {:?} does not match pattern {}",
                    e,
                    stringify!($pattern)
                );
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use domain_claims::aggregate;
    use rust_decimal_macros::dec;

    use crate::fixtures::{ItemFixtures, PolicyFixtures};

    #[test]
    fn test_assert_money_approx_eq_passes() {
        let m1 = Money::new(dec!(100.001), Currency::INR);
        let m2 = Money::new(dec!(100.002), Currency::INR);
        assert_money_approx_eq(&m1, &m2, dec!(0.01));
    }

    #[test]
    #[should_panic(expected = "Currency mismatch")]
    fn test_assert_money_approx_eq_currency_mismatch() {
        let m1 = Money::new(dec!(100.00), Currency::INR);
        let m2 = Money::new(dec!(100.00), Currency::USD);
        assert_money_approx_eq(&m1, &m2, dec!(0.01));
    }

    #[test]
    fn test_assert_money_sum_equals() {
        let parts = vec![
            Money::new(dec!(33.34), Currency::INR),
            Money::new(dec!(33.33), Currency::INR),
            Money::new(dec!(33.33), Currency::INR),
        ];
        let total = Money::new(dec!(100.00), Currency::INR);
        assert_money_sum_equals(&parts, &total);
    }

    #[test]
    fn test_assert_conservation_on_worked_example() {
        let result = aggregate(
            &ItemFixtures::worked_example(),
            PolicyFixtures::copay(dec!(20)),
            Currency::INR,
        );
        assert_conservation(&result);
    }

    #[test]
    fn test_assert_decimal_approx_eq() {
        assert_decimal_approx_eq(dec!(100.001), dec!(100.002), dec!(0.01));
    }
}
