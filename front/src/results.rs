use std::fmt;

use booking::RoomTypeSummary;
use serde_json::Value;

use crate::messages::NO_AVAILABILITY;

const PLACEHOLDER_CARDS: usize = 3;
const DEFAULT_IMAGE: &str = "/default-room.jpg";

/// What the availability results area shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    /// nothing searched yet
    Blank,
    Loading { placeholders: usize },
    NoAvailability,
    Rooms(Vec<RoomCard>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoomCard {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub price_per_night: Option<f64>,
    pub available_count: usize,
}

impl ResultsView {
    pub fn build(loading: bool, has_searched: bool, summaries: &[RoomTypeSummary]) -> Self {
        if loading {
            return ResultsView::Loading {
                placeholders: PLACEHOLDER_CARDS,
            };
        }
        match (has_searched, summaries.is_empty()) {
            (true, true) => ResultsView::NoAvailability,
            (false, true) => ResultsView::Blank,
            _ => ResultsView::Rooms(summaries.iter().map(RoomCard::from).collect()),
        }
    }
}

impl From<&RoomTypeSummary> for RoomCard {
    fn from(summary: &RoomTypeSummary) -> Self {
        let rt = &summary.room_type;
        // room types served by the catalogue endpoints carry `price_per_night`
        let price = rt
            .base_price
            .or_else(|| rt.extra.get("price_per_night").and_then(Value::as_f64));
        Self {
            id: rt.id,
            name: rt.name.clone().unwrap_or_default(),
            description: rt.description.clone().unwrap_or_default(),
            image_url: rt
                .image_url
                .clone()
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
            price_per_night: price,
            available_count: summary.available_count,
        }
    }
}

impl RoomCard {
    pub fn price_label(&self) -> String {
        match self.price_per_night {
            Some(price) => format!("{price:.2} € / noche"),
            None => "- € / noche".to_string(),
        }
    }

    pub fn count_label(&self) -> String {
        format!("{} disponibles", self.available_count)
    }
}

impl fmt::Display for RoomCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        if !self.description.is_empty() {
            writeln!(f, "  {}", self.description)?;
        }
        writeln!(f, "  {}", self.price_label())?;
        writeln!(f, "  {}", self.count_label())?;
        write!(f, "  [Reservar]")
    }
}

impl fmt::Display for ResultsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultsView::Blank => Ok(()),
            ResultsView::Loading { placeholders } => {
                for _ in 0..*placeholders {
                    writeln!(f, "[ ........ ]")?;
                }
                Ok(())
            }
            ResultsView::NoAvailability => write!(f, "{NO_AVAILABILITY}"),
            ResultsView::Rooms(cards) => {
                for (i, card) in cards.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    writeln!(f, "{card}")?;
                }
                Ok(())
            }
        }
    }
}
