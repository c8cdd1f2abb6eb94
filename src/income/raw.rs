/// Number of positional fields in a data line.
pub const FIELD_COUNT: usize = 8;

/// One `;`-delimited data line, every field trimmed.
///
/// `year` and `household_type` are blank on continuation lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord<'a> {
    pub year: &'a str,
    pub household_type: &'a str,
    pub household_count: &'a str,
    pub count_flag: &'a str,
    pub gross_income: &'a str,
    pub gross_flag: &'a str,
    pub net_income: &'a str,
    pub net_flag: &'a str,
}

impl<'a> RawRecord<'a> {
    /// Split a line. Returns None when it has fewer than eight fields;
    /// anything past the eighth is ignored.
    pub fn split(line: &'a str) -> Option<Self> {
        let mut it = line.split(';').map(str::trim);
        let mut f: [&'a str; FIELD_COUNT] = [""; FIELD_COUNT];
        for slot in f.iter_mut() {
            *slot = it.next()?;
        }
        Some(Self {
            year: f[0],
            household_type: f[1],
            household_count: f[2],
            count_flag: f[3],
            gross_income: f[4],
            gross_flag: f[5],
            net_income: f[6],
            net_flag: f[7],
        })
    }

    /// The year field, if it is non-blank and all ASCII digits.
    pub fn year_value(&self) -> Option<i32> {
        if self.year.is_empty() || !self.year.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        self.year.parse().ok()
    }
}
