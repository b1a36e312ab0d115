/*
Copyright 2025 Connor Nolan

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

/// Resolves a register spelling to its index in the register file.
///
/// Accepts `xN` for N in [0, 31], the fixed ABI names (`zero`, `ra`, `sp`,
/// `gp`, `tp`, `fp`) and the `t`/`s`/`a` families. Returns `None` for
/// anything else; callers report the offending token.
pub fn resolve(name: &str) -> Option<u8> {
    match name {
        "zero" => return Some(0),
        "ra" => return Some(1),
        "sp" => return Some(2),
        "gp" => return Some(3),
        "tp" => return Some(4),
        "fp" => return Some(8),
        _ => {}
    }

    let mut chars = name.chars();
    let family = chars.next()?;
    let suffix = chars.as_str();
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index: u8 = suffix.parse().ok()?;

    match family {
        'x' if index < 32 => Some(index),
        't' if index <= 2 => Some(index + 5),
        't' if (3..=6).contains(&index) => Some(index + 25),
        's' if index == 0 => Some(8),
        's' if index == 1 => Some(9),
        's' if (2..=11).contains(&index) => Some(index + 16),
        'a' if index <= 7 => Some(index + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_registers() {
        assert_eq!(resolve("x0"), Some(0));
        assert_eq!(resolve("x15"), Some(15));
        assert_eq!(resolve("x31"), Some(31));
        assert_eq!(resolve("x32"), None);
        assert_eq!(resolve("x99"), None);
    }

    #[test]
    fn test_fixed_abi_names() {
        assert_eq!(resolve("zero"), Some(0));
        assert_eq!(resolve("ra"), Some(1));
        assert_eq!(resolve("sp"), Some(2));
        assert_eq!(resolve("gp"), Some(3));
        assert_eq!(resolve("tp"), Some(4));
        assert_eq!(resolve("fp"), Some(8));
    }

    #[test]
    fn test_temporary_family() {
        assert_eq!(resolve("t0"), Some(5));
        assert_eq!(resolve("t2"), Some(7));
        assert_eq!(resolve("t3"), Some(28));
        assert_eq!(resolve("t6"), Some(31));
        assert_eq!(resolve("t7"), None);
    }

    #[test]
    fn test_saved_family() {
        assert_eq!(resolve("s0"), Some(8));
        assert_eq!(resolve("s1"), Some(9));
        assert_eq!(resolve("s2"), Some(18));
        assert_eq!(resolve("s11"), Some(27));
        assert_eq!(resolve("s12"), None);
    }

    #[test]
    fn test_argument_family() {
        assert_eq!(resolve("a0"), Some(10));
        assert_eq!(resolve("a7"), Some(17));
        assert_eq!(resolve("a8"), None);
    }

    #[test]
    fn test_rejects_non_registers() {
        assert_eq!(resolve(""), None);
        assert_eq!(resolve("x"), None);
        assert_eq!(resolve("x1a"), None);
        assert_eq!(resolve("b3"), None);
        assert_eq!(resolve("loop"), None);
    }
}
