/// Construction options for a [`GlobalNames`](crate::GlobalNames).
#[derive(Debug, Clone)]
pub struct NameTableParams {
    utf8_capacity: usize,
    unique_capacity: usize,
    constant_capacity: usize,
    well_known: bool,
}

impl Default for NameTableParams {
    fn default() -> Self {
        Self {
            utf8_capacity: 0,
            unique_capacity: 0,
            constant_capacity: 0,
            well_known: true,
        }
    }
}

impl NameTableParams {
    pub fn new() -> Self {
        NameTableParams::default()
    }

    /// Reserves room for this many identifiers up front. Counts the well-known names too.
    pub fn set_utf8_capacity(mut self, capacity: usize) -> Self {
        self.utf8_capacity = capacity;
        self
    }

    pub fn set_unique_capacity(mut self, capacity: usize) -> Self {
        self.unique_capacity = capacity;
        self
    }

    pub fn set_constant_capacity(mut self, capacity: usize) -> Self {
        self.constant_capacity = capacity;
        self
    }

    /// Whether the table is seeded with the [`well_known`](crate::well_known) names. On by default.
    ///
    /// The statically known handles must not be used with a table that was created without them.
    pub fn set_well_known(mut self, well_known: bool) -> Self {
        self.well_known = well_known;
        self
    }

    pub fn utf8_capacity(&self) -> usize {
        self.utf8_capacity
    }

    pub fn unique_capacity(&self) -> usize {
        self.unique_capacity
    }

    pub fn constant_capacity(&self) -> usize {
        self.constant_capacity
    }

    pub fn well_known(&self) -> bool {
        self.well_known
    }
}
