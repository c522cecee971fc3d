// Copyright (c) Nimbus SDK Contributors.
// Licensed under the MIT License.

mod md5_tests;
mod sha256_tests;

use super::*;
