use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{Result, StatsError};
use crate::fetch::{HttpTransport, StatsRequest, Transport};
use crate::xml::{self, Field, Link, Node, Section};

/// Substring the service embeds in its reply when no account matches.
pub const NO_USER_MARKER: &str = "No user";
pub const NO_HOME_PAGE: &str = "No Home Page";
pub const NO_URL: &str = "No URL";

/// One completed statistics lookup. Only obtainable through a successful
/// fetch, so every accessor reads from a parsed document.
#[derive(Debug, Clone)]
pub struct StatsClient {
    request: StatsRequest,
    raw_body: String,
    stats: Section,
}

impl StatsClient {
    pub fn new(email: &str) -> Result<Self> {
        Self::from_config(email, &ClientConfig::default())
    }

    pub fn from_config(email: &str, config: &ClientConfig) -> Result<Self> {
        let request = StatsRequest::new(email, config)?;
        let transport = HttpTransport::new(config)?;
        Self::fetch(request, &transport)
    }

    pub fn with_transport<T: Transport + ?Sized>(
        email: &str,
        config: &ClientConfig,
        transport: &T,
    ) -> Result<Self> {
        let request = StatsRequest::new(email, config)?;
        Self::fetch(request, transport)
    }

    fn fetch<T: Transport + ?Sized>(request: StatsRequest, transport: &T) -> Result<Self> {
        let start_time = Instant::now();
        info!(action = "start", component = "stats_lookup", email = request.email(), "Looking up account");

        let raw_body = transport.get(request.url())?;

        if raw_body.contains(NO_USER_MARKER) {
            warn!(action = "validate", component = "stats_lookup", email = request.email(), "Service reports no such account");
            return Err(StatsError::InvalidAccount {
                email: request.email().to_string(),
            });
        }

        let stats = xml::parse_document(&raw_body);

        info!(
            action = "complete",
            component = "stats_lookup",
            section_count = stats.len(),
            duration_ms = start_time.elapsed().as_millis(),
            "Account lookup completed"
        );
        Ok(Self {
            request,
            raw_body,
            stats,
        })
    }

    fn section(&self, name: &str) -> Option<&Section> {
        self.stats.get(name).and_then(Node::as_section)
    }

    fn field(&self, section: &str, key: &str) -> Option<&Field> {
        self.section(section)?.get(key)?.as_field()
    }

    fn text(&self, section: &str, key: &str) -> Option<&str> {
        self.field(section, key).map(Field::text)
    }

    pub fn email(&self) -> &str {
        self.request.email()
    }

    pub fn url(&self) -> &Url {
        self.request.url()
    }

    pub fn raw_body(&self) -> &str {
        &self.raw_body
    }

    pub fn stats(&self) -> &Section {
        &self.stats
    }

    pub fn user_info(&self) -> Option<&Section> {
        self.section("userinfo")
    }

    pub fn user_time(&self) -> Option<&str> {
        self.text("userinfo", "usertime")
    }

    pub fn ave_cpu(&self) -> Option<&str> {
        self.text("userinfo", "avecpu")
    }

    pub fn num_results(&self) -> Option<&str> {
        self.text("userinfo", "numresults")
    }

    pub fn reg_date(&self) -> Option<&str> {
        self.text("userinfo", "regdate")
    }

    pub fn results_per_day(&self) -> Option<&str> {
        self.text("userinfo", "resultsperday")
    }

    pub fn last_result_time(&self) -> &str {
        self.text("userinfo", "lastresulttime").unwrap_or("0")
    }

    pub fn cpu_time(&self) -> Option<&str> {
        self.text("userinfo", "cputime")
    }

    pub fn name(&self) -> Option<&str> {
        self.text("userinfo", "name")
    }

    pub fn home_page(&self) -> &str {
        self.field("userinfo", "name")
            .and_then(Field::as_link)
            .and_then(|link| link.href.as_deref())
            .unwrap_or(NO_HOME_PAGE)
    }

    pub fn profile_url(&self) -> &str {
        self.field("userinfo", "userprofile")
            .and_then(Field::as_link)
            .and_then(|link| link.href.as_deref())
            .unwrap_or(NO_URL)
    }

    pub fn rank_info(&self) -> Option<&Section> {
        self.section("rankinfo")
    }

    pub fn have_same_rank(&self) -> Option<&str> {
        self.text("rankinfo", "num_samerank")
    }

    pub fn total_users(&self) -> Option<&str> {
        self.text("rankinfo", "ranktotalusers")
    }

    pub fn rank(&self) -> Option<&str> {
        self.text("rankinfo", "rank")
    }

    /// Share of accounts ranked below this one, `100 - top_rankpct`.
    pub fn rank_percent(&self) -> Option<f64> {
        let top_pct: f64 = self.text("rankinfo", "top_rankpct")?.trim().parse().ok()?;
        Some(100.0 - top_pct)
    }

    pub fn group_info(&self) -> Option<&Link> {
        self.field("groupinfo", "group")?.as_link()
    }

    pub fn group_name(&self) -> Option<&str> {
        self.text("groupinfo", "group")
    }

    pub fn group_url(&self) -> Option<&str> {
        self.group_info()?.href.as_deref()
    }

    pub fn summary(&self) -> StatsSummary {
        fn owned(value: Option<&str>) -> Option<String> {
            value.map(str::to_string)
        }

        StatsSummary {
            email: self.email().to_string(),
            url: self.url().to_string(),
            name: owned(self.name()),
            home_page: self.home_page().to_string(),
            profile_url: self.profile_url().to_string(),
            user_time: owned(self.user_time()),
            ave_cpu: owned(self.ave_cpu()),
            num_results: owned(self.num_results()),
            reg_date: owned(self.reg_date()),
            results_per_day: owned(self.results_per_day()),
            last_result_time: self.last_result_time().to_string(),
            cpu_time: owned(self.cpu_time()),
            rank: owned(self.rank()),
            total_users: owned(self.total_users()),
            have_same_rank: owned(self.have_same_rank()),
            rank_percent: self.rank_percent(),
            group_name: owned(self.group_name()),
            group_url: owned(self.group_url()),
        }
    }
}

/// Owned snapshot of every accessor, for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSummary {
    pub email: String,
    pub url: String,
    pub name: Option<String>,
    pub home_page: String,
    pub profile_url: String,
    pub user_time: Option<String>,
    pub ave_cpu: Option<String>,
    pub num_results: Option<String>,
    pub reg_date: Option<String>,
    pub results_per_day: Option<String>,
    pub last_result_time: String,
    pub cpu_time: Option<String>,
    pub rank: Option<String>,
    pub total_users: Option<String>,
    pub have_same_rank: Option<String>,
    pub rank_percent: Option<f64>,
    pub group_name: Option<String>,
    pub group_url: Option<String>,
}
