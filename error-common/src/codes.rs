// Error codes implementation
// Machine-readable reason codes carried in HTTP error bodies

pub mod validation {
    pub const INVALID_INPUT: &str = "VALIDATION_1001";
    pub const MISSING_REQUIRED_FIELD: &str = "VALIDATION_1002";
    pub const INVALID_FORMAT: &str = "VALIDATION_1003";
}

pub mod expand {
    pub const INVALID_TUPLE: &str = "EXPAND_4001";
    pub const NOT_FOUND: &str = "EXPAND_4041";
    pub const ENGINE_FAILURE: &str = "EXPAND_5001";
}
