use super::InputError;

/// Validates that values and sigmas describe a propagatable set of inputs.
///
/// # Errors
///
/// Returns the first problem found: empty or mismatched vectors, then
/// per-index checks in order.
pub(super) fn validate(values: &[f64], sigmas: &[f64]) -> Result<(), InputError> {
    if values.len() != sigmas.len() {
        return Err(InputError::LengthMismatch {
            values: values.len(),
            sigmas: sigmas.len(),
        });
    }

    if values.is_empty() {
        return Err(InputError::Empty);
    }

    for (index, (&value, &sigma)) in values.iter().zip(sigmas).enumerate() {
        if !value.is_finite() {
            return Err(InputError::NonFiniteValue { index, value });
        }
        if !sigma.is_finite() {
            return Err(InputError::NonFiniteSigma { index, sigma });
        }
        if sigma < 0.0 {
            return Err(InputError::NegativeSigma { index, sigma });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_zero_sigmas() {
        assert_eq!(validate(&[1.0, -2.0], &[0.0, 0.0]), Ok(()));
    }

    #[test]
    fn length_mismatch_is_reported_before_emptiness() {
        assert_eq!(
            validate(&[], &[0.1]),
            Err(InputError::LengthMismatch {
                values: 0,
                sigmas: 1
            })
        );
        assert_eq!(validate(&[], &[]), Err(InputError::Empty));
    }

    #[test]
    fn reports_first_offending_index() {
        assert_eq!(
            validate(&[1.0, 2.0, 3.0], &[0.1, -0.2, -0.3]),
            Err(InputError::NegativeSigma {
                index: 1,
                sigma: -0.2
            })
        );
        assert!(matches!(
            validate(&[1.0, f64::INFINITY], &[0.1, 0.1]),
            Err(InputError::NonFiniteValue { index: 1, .. })
        ));
        assert!(matches!(
            validate(&[1.0], &[f64::NAN]),
            Err(InputError::NonFiniteSigma { index: 0, .. })
        ));
    }
}
