//! Timeline contradiction detection
//!
//! Extracts time-of-day mentions from free text (qualified or bare clock
//! expressions, noon/midnight) and from known evidence fields, then flags
//! any pair more than the tolerance apart.

use super::contradiction_id;
use super::traits::Detector;
use crate::context::InvestigationContext;
use crate::error::CaseResult;
use crate::model::{ContradictionResult, ContradictionType, Evidence};
use crate::query::ContradictionQuery;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, NaiveTime};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Two times conflict iff they differ by more than this many minutes.
const TOLERANCE_MINUTES: i64 = 10;

/// Evidence content fields probed for times, in detection order.
const TIME_FIELDS: [&str; 6] = [
    "time",
    "arrival_time",
    "departure_time",
    "timestamp",
    "scheduled_time",
    "actual_time",
];

/// `at/around/about/approximately 1 PM`, `... 11:50`, minutes optional.
static QUALIFIED_CLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:at|around|about|approximately)\s+(\d{1,2}):?(\d{2})?\s*(AM|PM)?")
        .expect("qualified clock pattern")
});

/// `at/around/about/approximately noon|midnight`.
static QUALIFIED_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:at|around|about|approximately)\s+(noon|midnight)")
        .expect("qualified word pattern")
});

/// Bare `H:MM`, optionally with AM/PM.
static BARE_CLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d{1,2}):(\d{2})\s*(AM|PM)?").expect("bare clock pattern"));

/// One extracted time-of-day, with the text that produced it.
#[derive(Debug, Clone)]
struct TimeMention {
    time: NaiveTime,
    /// Human-readable provenance: the scanned text or the raw field value
    source: String,
}

/// Detects timeline contradictions.
#[derive(Debug, Default)]
pub struct TimelineDetector;

impl TimelineDetector {
    pub fn new() -> Self {
        Self
    }

    async fn detect_testimony_vs_evidence(
        &self,
        query_id: &str,
        testimony_id: &str,
        evidence_id: &str,
        context: &InvestigationContext,
    ) -> CaseResult<ContradictionResult> {
        let testimony = context.testimony(testimony_id).await?;
        let evidence = context.evidence(evidence_id).await?;
        let (Some(testimony), Some(evidence)) = (testimony, evidence) else {
            return Ok(ContradictionResult::no_contradiction(
                ContradictionType::Timeline,
                query_id,
                "Testimony or evidence not found",
            ));
        };

        let testimony_times = extract_times_from_text(testimony.current_text());
        if testimony_times.is_empty() {
            return Ok(ContradictionResult::no_contradiction(
                ContradictionType::Timeline,
                query_id,
                "No time information in testimony",
            ));
        }

        let evidence_times = extract_times_from_evidence(&evidence);
        if evidence_times.is_empty() {
            return Ok(ContradictionResult::no_contradiction(
                ContradictionType::Timeline,
                query_id,
                "No time information in evidence",
            ));
        }

        for testimony_time in &testimony_times {
            for evidence_time in &evidence_times {
                if are_times_conflicting(testimony_time.time, evidence_time.time) {
                    let description = format!(
                        "Testimony states '{}' but evidence shows '{}'",
                        testimony_time.source, evidence_time.source
                    );
                    let id =
                        contradiction_id(Some(&testimony.suspect_id), ContradictionType::Timeline);
                    return Ok(ContradictionResult::contradiction(
                        ContradictionType::Timeline,
                        id,
                        description,
                    )
                    .with_affected_suspect(&testimony.suspect_id)
                    .with_related_evidence(&evidence.id));
                }
            }
        }

        Ok(ContradictionResult::no_contradiction(
            ContradictionType::Timeline,
            query_id,
            "Times are consistent",
        ))
    }

    async fn detect_evidence_vs_evidence(
        &self,
        query_id: &str,
        primary_id: &str,
        secondary_id: &str,
        context: &InvestigationContext,
    ) -> CaseResult<ContradictionResult> {
        let primary = context.evidence(primary_id).await?;
        let secondary = context.evidence(secondary_id).await?;
        let (Some(primary), Some(secondary)) = (primary, secondary) else {
            return Ok(ContradictionResult::no_contradiction(
                ContradictionType::Timeline,
                query_id,
                "Evidence not found",
            ));
        };

        let primary_times = extract_times_from_evidence(&primary);
        let secondary_times = extract_times_from_evidence(&secondary);
        if primary_times.is_empty() || secondary_times.is_empty() {
            return Ok(ContradictionResult::no_contradiction(
                ContradictionType::Timeline,
                query_id,
                "Insufficient time information",
            ));
        }

        for time1 in &primary_times {
            for time2 in &secondary_times {
                if are_times_conflicting(time1.time, time2.time) {
                    let description = format!(
                        "Evidence conflict: '{}' shows '{}' but '{}' shows '{}'",
                        primary.title, time1.source, secondary.title, time2.source
                    );
                    let id = contradiction_id(None, ContradictionType::Timeline);
                    return Ok(ContradictionResult::contradiction(
                        ContradictionType::Timeline,
                        id,
                        description,
                    )
                    .with_related_evidence(&primary.id)
                    .with_related_evidence(&secondary.id));
                }
            }
        }

        Ok(ContradictionResult::no_contradiction(
            ContradictionType::Timeline,
            query_id,
            "Evidence times are consistent",
        ))
    }
}

#[async_trait]
impl Detector for TimelineDetector {
    fn handled_type(&self) -> ContradictionType {
        ContradictionType::Timeline
    }

    async fn detect(
        &self,
        query: &ContradictionQuery,
        context: &InvestigationContext,
    ) -> CaseResult<ContradictionResult> {
        match query {
            ContradictionQuery::TestimonyVsEvidence {
                query_id,
                testimony_id,
                evidence_id,
                ..
            } => {
                self.detect_testimony_vs_evidence(query_id, testimony_id, evidence_id, context)
                    .await
            }
            ContradictionQuery::EvidenceVsEvidence {
                query_id,
                primary_evidence_id,
                secondary_evidence_id,
                ..
            } => {
                self.detect_evidence_vs_evidence(
                    query_id,
                    primary_evidence_id,
                    secondary_evidence_id,
                    context,
                )
                .await
            }
        }
    }
}

/// Scan free text for time mentions. The three patterns run in declared
/// order over the whole text; their matches concatenate.
fn extract_times_from_text(text: &str) -> Vec<TimeMention> {
    let mut times = Vec::new();

    for caps in QUALIFIED_CLOCK_RE.captures_iter(text) {
        if let Some(mention) = mention_from_clock_captures(&caps, text) {
            times.push(mention);
        }
    }

    for caps in QUALIFIED_WORD_RE.captures_iter(text) {
        let word = caps[1].to_lowercase();
        let time = if word == "noon" {
            NaiveTime::from_hms_opt(12, 0, 0)
        } else {
            NaiveTime::from_hms_opt(0, 0, 0)
        };
        if let Some(time) = time {
            times.push(TimeMention {
                time,
                source: text.to_string(),
            });
        }
    }

    for caps in BARE_CLOCK_RE.captures_iter(text) {
        if let Some(mention) = mention_from_clock_captures(&caps, text) {
            times.push(mention);
        }
    }

    times
}

fn mention_from_clock_captures(caps: &Captures<'_>, text: &str) -> Option<TimeMention> {
    let mut hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minute: u32 = caps
        .get(2)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);

    match caps.get(3).map(|m| m.as_str().to_ascii_lowercase()) {
        Some(ref meridiem) if meridiem == "pm" && hour < 12 => hour += 12,
        Some(ref meridiem) if meridiem == "am" && hour == 12 => hour = 0,
        _ => {}
    }

    // Out-of-range clock values read as "no fact extracted".
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    Some(TimeMention {
        time,
        source: text.to_string(),
    })
}

/// Probe the declared time fields in order, then re-scan the title.
fn extract_times_from_evidence(evidence: &Evidence) -> Vec<TimeMention> {
    let mut times = Vec::new();

    for field in TIME_FIELDS {
        if let Some(raw) = evidence.content_text(field) {
            if let Some(time) = parse_time_value(&raw) {
                times.push(TimeMention { time, source: raw });
            }
        }
    }

    times.extend(extract_times_from_text(&evidence.title));
    times
}

/// Parse a field value as a clock time, or as a full timestamp keeping only
/// the time-of-day. Unparsable values yield no fact.
fn parse_time_value(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();

    if let Ok(time) = NaiveTime::parse_from_str(raw, "%H:%M:%S") {
        return Some(time);
    }
    if let Ok(time) = NaiveTime::parse_from_str(raw, "%H:%M") {
        return Some(time);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.time());
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(stamp.time());
        }
    }
    None
}

fn are_times_conflicting(a: NaiveTime, b: NaiveTime) -> bool {
    (a - b).num_seconds().abs() > TOLERANCE_MINUTES * 60
}
