// Copyright 2021 Parallel Finance Developer.
// This file is part of Parallel Finance.

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
// http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use num_bigint::BigUint;
use num_traits::{CheckedDiv, CheckedMul, ToPrimitive, Zero};

pub trait ConvertToBigUint {
    fn get_big_uint(&self) -> BigUint;
}

impl ConvertToBigUint for u128 {
    fn get_big_uint(&self) -> BigUint {
        BigUint::from(*self)
    }
}

/// `a * b / c` rounded down, computed without intermediate overflow.
///
/// Returns `None` when `c` is zero or the quotient does not fit in `u128`.
pub fn mul_div_floor(a: u128, b: u128, c: u128) -> Option<u128> {
    if c.is_zero() {
        return None;
    }
    a.get_big_uint()
        .checked_mul(&b.get_big_uint())?
        .checked_div(&c.get_big_uint())?
        .to_u128()
}
