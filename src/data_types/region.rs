
use serde::Serialize;

use crate::evaluator::errors::EvaluationError;

/// A clause region; unlike most interval types in htslib, this one is 1-based and inclusive on both ends
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RegionSpec {
    /// Chromosome string, passed through verbatim
    chrom: String,
    /// 1-based start, inclusive
    start: u64,
    /// 1-based end, inclusive
    end: u64
}

impl RegionSpec {
    /// Constructor with verification
    /// # Errors
    /// * if `start` is 0 or `end < start`
    pub fn new(chrom: String, start: u64, end: u64) -> Result<RegionSpec, EvaluationError> {
        if start == 0 {
            return Err(EvaluationError::RegionFormat {
                text: format!("{chrom}:{start}-{end}"),
                reason: "start position is 1-based and cannot be 0".to_string()
            });
        }
        if end < start {
            return Err(EvaluationError::RegionFormat {
                text: format!("{chrom}:{start}-{end}"),
                reason: format!("end position ({end}) cannot be less than the start position ({start})")
            });
        }
        Ok(RegionSpec {
            chrom, start, end
        })
    }

    /// Parses text of the form `chrom:start-end`.
    /// # Arguments
    /// * `text` - the raw REGION entry from a rule row
    /// # Errors
    /// * if the text does not have exactly one ':' and exactly one '-' after it
    /// * if either position is not an integer
    /// * if the positions are out of order
    pub fn parse(text: &str) -> Result<RegionSpec, EvaluationError> {
        let format_error = |reason: &str| EvaluationError::RegionFormat {
            text: text.to_string(),
            reason: reason.to_string()
        };

        let (chrom, positions) = match text.split_once(':') {
            Some((c, p)) if !p.contains(':') => (c, p),
            Some(_) => return Err(format_error("expected exactly one ':'")),
            None => return Err(format_error("missing ':' between chromosome and positions"))
        };
        if chrom.is_empty() {
            return Err(format_error("chromosome is empty"));
        }

        let (start, end) = match positions.split_once('-') {
            Some((s, e)) if !e.contains('-') => (s, e),
            Some(_) => return Err(format_error("expected exactly one '-'")),
            None => return Err(format_error("missing '-' between start and end positions"))
        };
        let start: u64 = start.parse()
            .map_err(|_| format_error("start position is not an integer"))?;
        let end: u64 = end.parse()
            .map_err(|_| format_error("end position is not an integer"))?;

        RegionSpec::new(chrom.to_string(), start, end).map_err(|e| match e {
            // re-label with the original text so the user sees what they wrote
            EvaluationError::RegionFormat { reason, .. } => EvaluationError::RegionFormat { text: text.to_string(), reason },
            other => other
        })
    }

    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    /// Number of bases covered by the region
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Always false, a region covers at least one base
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Wrapper for sending to an interval index; returns 0-based, half-open coordinates
    pub fn interval_query(&self) -> (&str, u64, u64) {
        (&self.chrom, self.start - 1, self.end)
    }
}

impl std::fmt::Display for RegionSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.end)
    }
}
