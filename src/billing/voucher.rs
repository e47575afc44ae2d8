//! Voucher code normalization.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::billing::PlanError;

const MAX_LEN: usize = 64;

/// A syntactically valid voucher code, e.g. `AJAX-2024-X8K2`.
///
/// Upper-cased ASCII alphanumeric groups separated by single dashes.
/// Whether the code exists or was already redeemed is for the backend to say.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VoucherCode(String);

impl VoucherCode {
    pub fn parse(raw: &str) -> Result<Self, PlanError> {
        let code = raw.trim().to_ascii_uppercase();

        let well_formed = !code.is_empty()
            && code.len() <= MAX_LEN
            && code
                .split('-')
                .all(|group| !group.is_empty() && group.chars().all(|c| c.is_ascii_alphanumeric()));

        if well_formed {
            Ok(Self(code))
        } else {
            Err(PlanError::InvalidVoucher(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for VoucherCode {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for VoucherCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
