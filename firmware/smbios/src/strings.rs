//! SMBIOS string pool lookup.

/// Lookup of structure strings by their 1-based index
///
/// Index 0 means "no string" and never resolves.
pub trait StringResolver {
    /// Resolve a string index
    fn resolve(&self, index: u8) -> Option<&str>;
}

/// String table that follows the formatted area of a structure
#[derive(Debug, Clone, Copy)]
pub struct StringTable<'a> {
    data: &'a [u8],
}

impl<'a> StringTable<'a> {
    /// Create from the bytes following the formatted area
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Get string by index (1-based)
    pub fn get(&self, index: u8) -> Option<&'a str> {
        if index == 0 {
            return None;
        }

        self.iter().nth(index as usize - 1)
    }

    /// Number of strings in the table
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether the table holds no strings
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Iterate all strings
    pub fn iter(&self) -> StringTableIter<'a> {
        StringTableIter {
            data: self.data,
            pos: 0,
        }
    }
}

impl StringResolver for StringTable<'_> {
    fn resolve(&self, index: u8) -> Option<&str> {
        self.get(index)
    }
}

/// String table iterator
///
/// Strings that are not valid UTF-8 come out empty so indices stay aligned.
#[derive(Debug, Clone)]
pub struct StringTableIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for StringTableIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        // A leading null (or the end of data) terminates the pool
        if self.pos >= self.data.len() || self.data[self.pos] == 0 {
            return None;
        }

        let start = self.pos;
        while self.pos < self.data.len() && self.data[self.pos] != 0 {
            self.pos += 1;
        }
        let end = self.pos;

        // Skip null terminator
        self.pos += 1;

        Some(core::str::from_utf8(&self.data[start..end]).unwrap_or(""))
    }
}
