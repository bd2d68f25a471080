// Verhoeff check digit, used by 12-digit identity numbers

const MULTIPLICATION: [[usize; 10]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 2, 3, 4, 0, 6, 7, 8, 9, 5],
    [2, 3, 4, 0, 1, 7, 8, 9, 5, 6],
    [3, 4, 0, 1, 2, 8, 9, 5, 6, 7],
    [4, 0, 1, 2, 3, 9, 5, 6, 7, 8],
    [5, 9, 8, 7, 6, 0, 4, 3, 2, 1],
    [6, 5, 9, 8, 7, 1, 0, 4, 3, 2],
    [7, 6, 5, 9, 8, 2, 1, 0, 4, 3],
    [8, 7, 6, 5, 9, 3, 2, 1, 0, 4],
    [9, 8, 7, 6, 5, 4, 3, 2, 1, 0],
];

const PERMUTATION: [[usize; 10]; 8] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 5, 7, 6, 2, 8, 3, 0, 9, 4],
    [5, 8, 0, 3, 7, 9, 6, 1, 4, 2],
    [8, 9, 1, 6, 0, 4, 3, 5, 2, 7],
    [9, 4, 5, 3, 1, 2, 8, 7, 6, 0],
    [4, 2, 8, 6, 5, 7, 3, 9, 0, 1],
    [2, 7, 9, 3, 8, 0, 6, 4, 1, 5],
    [7, 0, 4, 6, 9, 1, 3, 2, 5, 8],
];

const INVERSE: [usize; 10] = [0, 4, 3, 2, 1, 5, 6, 7, 8, 9];

pub struct UidChecksum;

impl UidChecksum {
    /// True when the last digit is the Verhoeff check digit of the rest.
    /// Whitespace is ignored; any other non-digit makes the number invalid.
    pub fn is_valid(number: &str) -> bool {
        let Some(digits) = Self::digits(number) else {
            return false;
        };
        if digits.is_empty() {
            return false;
        }
        let check = digits
            .iter()
            .rev()
            .enumerate()
            .fold(0, |c, (i, &d)| MULTIPLICATION[c][PERMUTATION[i % 8][d]]);
        check == 0
    }

    /// Check digit to append to `number`
    pub fn check_digit(number: &str) -> Option<usize> {
        let digits = Self::digits(number)?;
        let c = digits
            .iter()
            .rev()
            .enumerate()
            .fold(0, |c, (i, &d)| MULTIPLICATION[c][PERMUTATION[(i + 1) % 8][d]]);
        Some(INVERSE[c])
    }

    fn digits(number: &str) -> Option<Vec<usize>> {
        number
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_digit(10).map(|d| d as usize))
            .collect()
    }
}
