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

/// Renders encoded words as memory-initialization text: four lines of
/// eight binary digits per word, least-significant byte first.
pub fn render(words: &[u32]) -> String {
    let mut output = String::with_capacity(words.len() * 36);
    for word in words {
        for byte in word.to_le_bytes() {
            output.push_str(&format!("{:08b}\n", byte));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_word_little_endian() {
        // addi x1, x0, 5
        let output = render(&[0b00000000010100000000000010010011]);
        assert_eq!(output, "10010011\n00000000\n01010000\n00000000\n");
    }

    #[test]
    fn test_render_line_count() {
        let output = render(&[0, 0xFFFFFFFF, 0x12345678]);
        assert_eq!(output.lines().count(), 12);
        assert!(output.lines().all(|l| l.len() == 8));
        assert!(
            output
                .lines()
                .all(|l| l.bytes().all(|b| b == b'0' || b == b'1'))
        );
    }

    #[test]
    fn test_render_empty_program() {
        assert_eq!(render(&[]), "");
    }
}
