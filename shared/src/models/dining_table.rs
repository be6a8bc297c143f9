//! Dining Table Model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::TableId;

/// Table status
///
/// `BOOKED` is accepted as an alias of `RESERVED` on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TableStatus {
    Available,
    #[serde(alias = "BOOKED")]
    Reserved,
    Cleaning,
    Occupied,
}

impl TableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableStatus::Available => "AVAILABLE",
            TableStatus::Reserved => "RESERVED",
            TableStatus::Cleaning => "CLEANING",
            TableStatus::Occupied => "OCCUPIED",
        }
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AVAILABLE" => Ok(TableStatus::Available),
            "RESERVED" | "BOOKED" => Ok(TableStatus::Reserved),
            "CLEANING" => Ok(TableStatus::Cleaning),
            "OCCUPIED" => Ok(TableStatus::Occupied),
            other => Err(format!("unknown table status: {other}")),
        }
    }
}

/// Dining table entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTable {
    pub id: TableId,
    pub capacity: u32,
    pub status: TableStatus,
}

impl DiningTable {
    pub fn new(id: TableId, capacity: u32) -> Self {
        Self {
            id,
            capacity,
            status: TableStatus::Available,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == TableStatus::Available
    }

    pub fn fits(&self, party_size: u32) -> bool {
        self.capacity >= party_size
    }
}

/// Update dining table payload (manager)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiningTableUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TableStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booked_is_an_alias_of_reserved() {
        let status: TableStatus = serde_json::from_str("\"BOOKED\"").unwrap();
        assert_eq!(status, TableStatus::Reserved);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"RESERVED\"");
        assert_eq!("cleaning".parse::<TableStatus>().unwrap(), TableStatus::Cleaning);
    }
}
