// src/linkedin/query.rs
//! Voyager job-search query encoding.
//!
//! The search endpoint takes its filters as a single string-encoded nested
//! map, rendered as `(key:value,key:(inner:value))` with no whitespace and no
//! quote characters. Free-text values (keywords, location) are injected via
//! placeholder substitution after the structural rendering so they cannot
//! collide with the structural stripping.

/// Default recency window: jobs posted within the last 24 hours.
pub const DEFAULT_LISTED_AT_SECS: u64 = 24 * 60 * 60;

const KEYWORD_PLACEHOLDER: &str = "KEYWORD_PLACEHOLDER";
const LOCATION_PLACEHOLDER: &str = "LOCATION_PLACEHOLDER";

/// Experience level filter codes accepted by the search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceLevel {
    Internship,
    EntryLevel,
    Associate,
    MidSenior,
    Director,
    Executive,
}

impl ExperienceLevel {
    fn code(self) -> &'static str {
        match self {
            ExperienceLevel::Internship => "1",
            ExperienceLevel::EntryLevel => "2",
            ExperienceLevel::Associate => "3",
            ExperienceLevel::MidSenior => "4",
            ExperienceLevel::Director => "5",
            ExperienceLevel::Executive => "6",
        }
    }
}

/// Job type filter codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobType {
    FullTime,
    Contract,
    PartTime,
    Temporary,
    Internship,
    Volunteer,
    Other,
}

impl JobType {
    fn code(self) -> &'static str {
        match self {
            JobType::FullTime => "F",
            JobType::Contract => "C",
            JobType::PartTime => "P",
            JobType::Temporary => "T",
            JobType::Internship => "I",
            JobType::Volunteer => "V",
            JobType::Other => "O",
        }
    }
}

/// Workplace type filter codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteMode {
    OnSite,
    Remote,
    Hybrid,
}

impl RemoteMode {
    fn code(self) -> &'static str {
        match self {
            RemoteMode::OnSite => "1",
            RemoteMode::Remote => "2",
            RemoteMode::Hybrid => "3",
        }
    }
}

/// Filter set for one job search call.
///
/// `limit = -1` means unbounded up to the server-defined cap. A `distance`
/// of zero is treated as absent and the server applies its own default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilters {
    pub keywords: Option<String>,
    pub companies: Vec<String>,
    pub experience: Vec<ExperienceLevel>,
    pub job_type: Vec<JobType>,
    pub job_title: Vec<String>,
    pub industries: Vec<String>,
    pub location_name: Option<String>,
    pub remote: Vec<RemoteMode>,
    pub listed_at: u64,
    pub distance: Option<u32>,
    pub easy_apply: bool,
    pub limit: i64,
    pub offset: usize,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            keywords: None,
            companies: Vec::new(),
            experience: Vec::new(),
            job_type: Vec::new(),
            job_title: Vec::new(),
            industries: Vec::new(),
            location_name: None,
            remote: Vec::new(),
            listed_at: DEFAULT_LISTED_AT_SECS,
            distance: None,
            easy_apply: true,
            limit: -1,
            offset: 0,
        }
    }
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    pub fn with_companies(mut self, companies: Vec<String>) -> Self {
        self.companies = companies;
        self
    }

    pub fn with_experience(mut self, experience: Vec<ExperienceLevel>) -> Self {
        self.experience = experience;
        self
    }

    pub fn with_job_types(mut self, job_type: Vec<JobType>) -> Self {
        self.job_type = job_type;
        self
    }

    pub fn with_job_titles(mut self, job_title: Vec<String>) -> Self {
        self.job_title = job_title;
        self
    }

    pub fn with_industries(mut self, industries: Vec<String>) -> Self {
        self.industries = industries;
        self
    }

    pub fn with_location(mut self, location_name: impl Into<String>) -> Self {
        self.location_name = Some(location_name.into());
        self
    }

    pub fn with_remote(mut self, remote: Vec<RemoteMode>) -> Self {
        self.remote = remote;
        self
    }

    pub fn with_listed_at(mut self, seconds: u64) -> Self {
        self.listed_at = seconds;
        self
    }

    pub fn with_distance(mut self, miles: u32) -> Self {
        self.distance = Some(miles);
        self
    }

    pub fn with_easy_apply(mut self, easy_apply: bool) -> Self {
        self.easy_apply = easy_apply;
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

/// Encode a filter set into the `query=` parameter value.
///
/// Pure function: identical filters always produce the identical string, and
/// the output never contains whitespace or quote characters.
pub fn build_query_string(filters: &SearchFilters) -> String {
    let mut pairs: Vec<(&str, String)> = vec![(
        "origin",
        "JOB_SEARCH_PAGE_QUERY_EXPANSION".to_string(),
    )];

    if filters.keywords.is_some() {
        pairs.push(("keywords", KEYWORD_PLACEHOLDER.to_string()));
    }
    if filters.location_name.is_some() {
        pairs.push(("locationFallback", LOCATION_PLACEHOLDER.to_string()));
    }

    let mut selected: Vec<(&str, String)> = Vec::new();
    if !filters.companies.is_empty() {
        selected.push(("company", encode_list(&filters.companies)));
    }
    if !filters.experience.is_empty() {
        let codes: Vec<String> = filters.experience.iter().map(|e| e.code().to_string()).collect();
        selected.push(("experience", encode_list(&codes)));
    }
    if !filters.job_type.is_empty() {
        let codes: Vec<String> = filters.job_type.iter().map(|t| t.code().to_string()).collect();
        selected.push(("jobType", encode_list(&codes)));
    }
    if !filters.job_title.is_empty() {
        selected.push(("title", encode_list(&filters.job_title)));
    }
    if !filters.industries.is_empty() {
        selected.push(("industry", encode_list(&filters.industries)));
    }
    if let Some(distance) = filters.distance.filter(|d| *d > 0) {
        selected.push(("distance", format!("List({distance})")));
    }
    if !filters.remote.is_empty() {
        let codes: Vec<String> = filters.remote.iter().map(|r| r.code().to_string()).collect();
        selected.push(("workplaceType", encode_list(&codes)));
    }
    if filters.easy_apply {
        selected.push(("applyWithLinkedin", "List(true)".to_string()));
    }
    selected.push(("timePostedRange", format!("List(r{})", filters.listed_at)));

    pairs.push(("selectedFilters", render_map(&selected)));
    pairs.push(("spellCorrectionEnabled", "true".to_string()));

    render_map(&pairs)
        .replace(
            KEYWORD_PLACEHOLDER,
            &sanitize_value(filters.keywords.as_deref().unwrap_or("")),
        )
        .replace(
            LOCATION_PLACEHOLDER,
            &sanitize_value(filters.location_name.as_deref().unwrap_or("")),
        )
}

fn encode_list(values: &[String]) -> String {
    format!("List({})", values.join(","))
}

fn render_map(pairs: &[(&str, String)]) -> String {
    let body: Vec<String> = pairs
        .iter()
        .map(|(key, value)| format!("{key}:{value}"))
        .collect();
    format!("({})", body.join(","))
}

/// Strip the characters the structural encoding forbids from a free-text
/// value before it is substituted into the rendered query.
fn sanitize_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\'' && *c != '"')
        .collect()
}
