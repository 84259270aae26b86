//! Named session artifacts and their dependency graph.

use std::fmt;

/// A cached, lazily computed product of an [`AnalysisSession`](crate::AnalysisSession).
///
/// ```text
/// Climatology ──> Anomalies
///      └────────> Amplitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Artifact {
    /// Per-period mean of every variable.
    Climatology,
    /// Detrended anomalies of every variable.
    Anomalies,
    /// Half range of the climatology.
    Amplitude,
}

impl Artifact {
    /// Every artifact, in dependency order.
    pub const ALL: [Artifact; 3] = [Artifact::Climatology, Artifact::Anomalies, Artifact::Amplitude];

    /// Artifacts that must exist before this one can be computed.
    pub fn dependencies(self) -> &'static [Artifact] {
        match self {
            Artifact::Climatology => &[],
            Artifact::Anomalies | Artifact::Amplitude => &[Artifact::Climatology],
        }
    }

    /// Artifacts computed directly from this one.
    pub fn dependents(self) -> impl Iterator<Item = Artifact> {
        Self::ALL
            .into_iter()
            .filter(move |a| a.dependencies().contains(&self))
    }

    /// This artifact followed by everything downstream of it.
    pub(crate) fn closure(self) -> Vec<Artifact> {
        let mut out = vec![self];
        let mut i = 0;
        while i < out.len() {
            for dep in out[i].dependents() {
                if !out.contains(&dep) {
                    out.push(dep);
                }
            }
            i += 1;
        }
        out
    }

    /// Lowercase identifier used in logs and reports.
    pub fn name(self) -> &'static str {
        match self {
            Artifact::Climatology => "climatology",
            Artifact::Anomalies => "anomalies",
            Artifact::Amplitude => "amplitude",
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
