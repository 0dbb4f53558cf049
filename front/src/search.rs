use abi::{AvailabilityQuery, AvailabilityRecord, Error};
use booking::{aggregate_with, CountPolicy, RoomTypeSummary};
use tracing::{debug, info};

use crate::{messages, HotelApi, ResultsView};

/// Draft input of the home search form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDraft {
    pub check_in: String,
    pub check_out: String,
    pub adults: u32,
    pub children: u32,
    /// preferred room type; kept with the draft, not sent to the backend
    pub room_type: Option<String>,
}

/// Handed out when a search starts, required to complete it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
}

#[derive(Debug, Default)]
pub struct SearchForm {
    pub draft: SearchDraft,
    pub policy: CountPolicy,
    has_searched: bool,
    loading: bool,
    error: Option<String>,
    results: Vec<AvailabilityRecord>,
    latest: u64,
}

impl Default for SearchDraft {
    fn default() -> Self {
        Self {
            check_in: String::new(),
            check_out: String::new(),
            adults: 1,
            children: 0,
            room_type: None,
        }
    }
}

impl SearchDraft {
    pub fn new(check_in: impl Into<String>, check_out: impl Into<String>) -> Self {
        Self {
            check_in: check_in.into(),
            check_out: check_out.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<AvailabilityQuery, Error> {
        if self.adults < 1 {
            return Err(Error::InvalidSearch("at least one adult is required".into()));
        }
        AvailabilityQuery::parse(&self.check_in, &self.check_out)
    }
}

impl SearchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

impl SearchForm {
    pub fn new(draft: SearchDraft) -> Self {
        Self {
            draft,
            ..Default::default()
        }
    }

    pub fn has_searched(&self) -> bool {
        self.has_searched
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn results(&self) -> &[AvailabilityRecord] {
        &self.results
    }

    pub fn summaries(&self) -> Vec<RoomTypeSummary> {
        aggregate_with(&self.results, self.policy)
    }

    pub fn view(&self) -> ResultsView {
        ResultsView::build(self.loading, self.has_searched, &self.summaries())
    }

    /// Mark a new search as started and supersede any search still in flight.
    pub fn begin(&mut self) -> SearchTicket {
        self.latest += 1;
        self.has_searched = true;
        self.loading = true;
        self.error = None;
        SearchTicket { seq: self.latest }
    }

    /// Record the outcome of a search. Returns `false` and leaves the form
    /// untouched when a newer search was started after `ticket`.
    pub fn complete(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<Vec<AvailabilityRecord>, Error>,
    ) -> bool {
        if ticket.seq != self.latest {
            debug!(
                "discarding stale search #{} (latest #{})",
                ticket.seq, self.latest
            );
            return false;
        }
        match outcome {
            Ok(records) => {
                info!("search #{} returned {} records", ticket.seq, records.len());
                self.results = records;
            }
            Err(e) => {
                self.error = Some(messages::user_message(&e, messages::SEARCH_FAILED));
                self.results.clear();
            }
        }
        self.loading = false;
        true
    }

    /// Search the backend with the current draft.
    pub async fn submit(&mut self, api: &dyn HotelApi) -> bool {
        let ticket = self.begin();
        let outcome = match self.draft.validate() {
            Ok(query) => api.search_availability(&query).await,
            Err(e) => Err(e),
        };
        self.complete(ticket, outcome)
    }

    /// Load every availability record regardless of dates.
    pub async fn load_all(&mut self, api: &dyn HotelApi) -> bool {
        let ticket = self.begin();
        let outcome = api.list_availability().await;
        self.complete(ticket, outcome)
    }
}
