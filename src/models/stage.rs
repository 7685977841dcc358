use serde::{Deserialize, Serialize};

/// Fulfillment stage (fixed sequence)
///
/// Every order moves through the same pipeline:
/// COOKING -> PACKAGING -> DELIVERY -> DELIVERED.
/// All stages except DELIVERED are confirmed manually from the board;
/// delivery completion is signaled by another channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    Cooking,
    Packaging,
    Delivery,
    Delivered,
}

/// Stages in pipeline order, least advanced first.
pub const STAGE_SEQUENCE: [Stage; 4] = [
    Stage::Cooking,
    Stage::Packaging,
    Stage::Delivery,
    Stage::Delivered,
];

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Cooking => "COOKING",
            Stage::Packaging => "PACKAGING",
            Stage::Delivery => "DELIVERY",
            Stage::Delivered => "DELIVERED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "COOKING" => Some(Stage::Cooking),
            "PACKAGING" => Some(Stage::Packaging),
            "DELIVERY" => Some(Stage::Delivery),
            "DELIVERED" => Some(Stage::Delivered),
            _ => None,
        }
    }

    /// Next stage in the fixed sequence, None after DELIVERED.
    pub fn next(&self) -> Option<Self> {
        match self {
            Stage::Cooking => Some(Stage::Packaging),
            Stage::Packaging => Some(Stage::Delivery),
            Stage::Delivery => Some(Stage::Delivered),
            Stage::Delivered => None,
        }
    }

    /// Display label shown on cards and in the board table.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Cooking => "Cooking",
            Stage::Packaging => "Packaging",
            Stage::Delivery => "Out for Delivery",
            Stage::Delivered => "Delivered",
        }
    }
}

/// Status of a single stage-history record.
///
/// DONE and COMPLETED both appear on the wire for a finished stage and are
/// treated identically. Unrecognized values land on Unknown rather than
/// failing the whole order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StageRecordStatus {
    #[default]
    Pending,
    InProgress,
    Done,
    Completed,
    #[serde(other)]
    Unknown,
}

impl StageRecordStatus {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done | Self::Completed)
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::InProgress)
    }
}

/// Order lifecycle status as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Created,
    #[default]
    Cooking,
    Packaging,
    Delivery,
    Delivered,
    Completed,
    InProgress,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "CREATED",
            OrderStatus::Cooking => "COOKING",
            OrderStatus::Packaging => "PACKAGING",
            OrderStatus::Delivery => "DELIVERY",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::InProgress => "IN_PROGRESS",
            OrderStatus::Unknown => "UNKNOWN",
        }
    }

    /// Terminal statuses have no staff action left on the card.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Completed)
    }

    /// Display label shown on cards.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Created => "Created",
            OrderStatus::Cooking => "Cooking",
            OrderStatus::Packaging => "Packaging",
            OrderStatus::Delivery => "Out for Delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Completed => "Completed",
            OrderStatus::InProgress => "In Progress",
            OrderStatus::Unknown => "Unknown",
        }
    }

    /// Color name for this status, resolved to an ANSI code at render time.
    pub fn color_name(&self) -> Option<&'static str> {
        match self {
            OrderStatus::Created => Some("blue"),
            OrderStatus::Cooking => Some("yellow"),
            OrderStatus::Packaging => Some("bright_yellow"),
            OrderStatus::Delivery => Some("magenta"),
            OrderStatus::Delivered => Some("green"),
            OrderStatus::Completed => Some("bright_black"),
            OrderStatus::InProgress => Some("blue"),
            OrderStatus::Unknown => None,
        }
    }
}
