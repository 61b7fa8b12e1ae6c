use std::fmt;

use crate::error::{Error, Result};
use crate::query::{ParamValue, Params, START_PARAM, check_start};

/// One queryable resource category of the NPS API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Categories of activities (astronomy, hiking, wildlife watching, ...).
    Activities,
    /// Park data: address, contacts, description, hours of operation.
    Parks,
    VisitorCenters,
    Campgrounds,
    /// Categories of topics (American revolution, music, women's history, ...).
    Topics,
    /// Parks related to topic categories.
    TopicsParks,
    /// Amenity types (accessible restrooms, fire pit, picnic area, ...).
    AmenityTypes,
    /// Places within parks that offer amenities.
    AmenityPlaces,
}

/// A filter an endpoint may accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Filter {
    ParkCode,
    StateCode,
    Query,
    Id,
}

impl Filter {
    fn wire_name(self) -> &'static str {
        match self {
            Filter::ParkCode => "parkCode",
            Filter::StateCode => "stateCode",
            Filter::Query => "q",
            Filter::Id => "id",
        }
    }

    fn field_name(self) -> &'static str {
        match self {
            Filter::ParkCode => "park_code",
            Filter::StateCode => "state_code",
            Filter::Query => "q",
            Filter::Id => "id",
        }
    }
}

const PARK_FILTERS: &[Filter] = &[Filter::ParkCode, Filter::StateCode, Filter::Query];
const CATEGORY_FILTERS: &[Filter] = &[Filter::Id, Filter::Query];
const PLACE_FILTERS: &[Filter] = &[Filter::ParkCode, Filter::Id, Filter::Query];

impl Endpoint {
    pub const ALL: [Endpoint; 8] = [
        Endpoint::Activities,
        Endpoint::Parks,
        Endpoint::VisitorCenters,
        Endpoint::Campgrounds,
        Endpoint::Topics,
        Endpoint::TopicsParks,
        Endpoint::AmenityTypes,
        Endpoint::AmenityPlaces,
    ];

    /// Path relative to the versioned base URL.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Activities => "/activities",
            Endpoint::Parks => "/parks",
            Endpoint::VisitorCenters => "/visitorcenters",
            Endpoint::Campgrounds => "/campgrounds",
            Endpoint::Topics => "/topics",
            Endpoint::TopicsParks => "/topics/parks",
            Endpoint::AmenityTypes => "/amenities",
            Endpoint::AmenityPlaces => "/amenities/parksplaces",
        }
    }

    pub(crate) fn filters(self) -> &'static [Filter] {
        match self {
            Endpoint::Parks | Endpoint::VisitorCenters | Endpoint::Campgrounds => PARK_FILTERS,
            Endpoint::Activities
            | Endpoint::Topics
            | Endpoint::TopicsParks
            | Endpoint::AmenityTypes => CATEGORY_FILTERS,
            Endpoint::AmenityPlaces => PLACE_FILTERS,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Optional filters for an endpoint call.
///
/// Empty strings are treated as "not supplied". `start` defaults to 0.
///
/// ```
/// use nps_client::Filters;
///
/// let filters = Filters::new().park_code("acad,yell").q("waterfall").start(100);
/// assert_eq!(filters.start_offset(), Some(100));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    park_code: Option<String>,
    state_code: Option<String>,
    q: Option<String>,
    id: Option<String>,
    start: Option<i64>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Comma delimited list of park codes.
    pub fn park_code(mut self, park_code: impl Into<String>) -> Self {
        self.park_code = Some(park_code.into());
        self
    }

    /// Comma delimited list of two character state codes.
    pub fn state_code(mut self, state_code: impl Into<String>) -> Self {
        self.state_code = Some(state_code.into());
        self
    }

    /// Term to search on.
    pub fn q(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    /// Topic, amenity or activity id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Offset of the first result. Negative values are rejected at call time.
    pub fn start(mut self, start: i64) -> Self {
        self.start = Some(start);
        self
    }

    pub fn start_offset(&self) -> Option<i64> {
        self.start
    }

    fn value(&self, filter: Filter) -> Option<&str> {
        let v = match filter {
            Filter::ParkCode => self.park_code.as_deref(),
            Filter::StateCode => self.state_code.as_deref(),
            Filter::Query => self.q.as_deref(),
            Filter::Id => self.id.as_deref(),
        };
        v.filter(|s| !s.is_empty())
    }

    /// Maps the filters onto `endpoint`'s wire names.
    pub(crate) fn to_params(&self, endpoint: Endpoint) -> Result<Params> {
        let start = check_start(self.start.unwrap_or(0))?;

        let accepted = endpoint.filters();
        let mut params = Params::new();
        params.insert(START_PARAM.to_string(), ParamValue::Int(start));

        for filter in [Filter::ParkCode, Filter::StateCode, Filter::Query, Filter::Id] {
            let Some(value) = self.value(filter) else {
                continue;
            };
            if !accepted.contains(&filter) {
                return Err(Error::invalid_argument(
                    filter.field_name(),
                    format!("not accepted by endpoint {endpoint}"),
                ));
            }
            params.insert(filter.wire_name().to_string(), ParamValue::from(value));
        }

        Ok(params)
    }
}
