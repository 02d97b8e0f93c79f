//! Enumerations describing arrays and the queries run against them.

c_enum! {
    /// Whether an array is dense or sparse.
    pub enum ArrayType {
        Dense = 0 => "dense",
        Sparse = 1 => "sparse",
    }
}

c_enum! {
    /// Order of tiles or cells within an array, or of results within a query.
    pub enum Layout {
        RowMajor = 0 => "row-major",
        ColumnMajor = 1 => "col-major",
        GlobalOrder = 2 => "global-order",
        Unordered = 3 => "unordered",
        Hilbert = 4 => "hilbert",
    }
}

impl Layout {
    /// Returns whether this layout may be used as the tile order of a schema.
    pub fn is_tile_order(&self) -> bool {
        matches!(self, Layout::RowMajor | Layout::ColumnMajor)
    }

    /// Returns whether this layout may be used as the cell order of a schema.
    pub fn is_cell_order(&self) -> bool {
        matches!(
            self,
            Layout::RowMajor | Layout::ColumnMajor | Layout::Hilbert
        )
    }
}

c_enum! {
    /// Mode in which an array is opened, and the kind of a query.
    pub enum QueryType {
        Read = 0 => "READ",
        Write = 1 => "WRITE",
        Delete = 2 => "DELETE",
        Update = 3 => "UPDATE",
        ModifyExclusive = 4 => "MODIFY_EXCLUSIVE",
    }
}

c_enum! {
    /// Progress of a submitted query.
    pub enum QueryStatus {
        Failed = 0 => "FAILED",
        Completed = 1 => "COMPLETED",
        InProgress = 2 => "INPROGRESS",
        Incomplete = 3 => "INCOMPLETE",
        Uninitialized = 4 => "UNINITIALIZED",
        Initialized = 5 => "INITIALIZED",
    }
}
