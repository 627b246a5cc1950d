use serde::{Deserialize, Serialize};

/// Identifier of a persisted order.
///
/// Assigned by the store when an order is first saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u32);

impl OrderId {
    /// Creates an order ID from a raw value.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    pub fn get(&self) -> u32 {
        self.0
    }

    /// Returns the identifier that follows this one, or `None` once the
    /// `u32` range is used up.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<OrderId> for u32 {
    fn from(id: OrderId) -> Self {
        id.0
    }
}

/// Identifier of a persisted order line.
///
/// Line IDs are unique across all orders and never reused, the way a
/// relational auto-increment column would hand them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(u32);

impl LineId {
    /// Creates a line ID from a raw value.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    pub fn get(&self) -> u32 {
        self.0
    }

    /// Returns the identifier that follows this one, or `None` once the
    /// `u32` range is used up.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl std::fmt::Display for LineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for LineId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<LineId> for u32 {
    fn from(id: LineId) -> Self {
        id.0
    }
}

/// Stock-keeping unit code, e.g. `"A1"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkuCode(String);

impl SkuCode {
    /// Creates a SKU code from a string.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SkuCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SkuCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SkuCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for SkuCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
