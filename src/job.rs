use std::collections::BTreeSet;
use std::fmt;

/// Records are kept in a `BTreeSet` so every file we write lists them in the
/// same order: by title, then department, project and location.
pub type JobRecordSet = BTreeSet<JobRecord>;

/// One posting on the careers page. Two records are the same posting only if
/// all four fields match.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JobRecord {
    pub title: String,
    pub department: String,
    pub project: String,
    pub location: String,
}

impl JobRecord {
    /// Builds a record, collapsing whitespace runs in every field.
    pub fn new(
        title: impl AsRef<str>,
        department: impl AsRef<str>,
        project: impl AsRef<str>,
        location: impl AsRef<str>,
    ) -> Self {
        Self {
            title: normalize_whitespace(title.as_ref()),
            department: normalize_whitespace(department.as_ref()),
            project: normalize_whitespace(project.as_ref()),
            location: normalize_whitespace(location.as_ref()),
        }
    }
}

impl fmt::Display for JobRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} / {} / {})",
            self.title, self.department, self.project, self.location
        )
    }
}

pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_normalized_on_construction() {
        let job = JobRecord::new(
            "  Senior\n   Gameplay Engineer ",
            "Engineering",
            "\tLeague of\tLegends",
            "Los Angeles,\n USA",
        );
        assert_eq!(job.title, "Senior Gameplay Engineer");
        assert_eq!(job.project, "League of Legends");
        assert_eq!(job.location, "Los Angeles, USA");
    }

    #[test]
    fn equality_requires_every_field() {
        let a = JobRecord::new("Engineer", "Eng", "ProjectA", "Seattle");
        let b = JobRecord::new("Engineer", "Eng", "ProjectA", "Dublin");
        assert_ne!(a, b);
        assert_eq!(a, JobRecord::new("Engineer ", " Eng", "ProjectA", "Seattle"));
    }

    #[test]
    fn set_orders_by_title_first() {
        let set: JobRecordSet = [
            JobRecord::new("Writer", "Art", "Arcane", "LA"),
            JobRecord::new("Artist", "Art", "Valorant", "LA"),
            JobRecord::new("Artist", "Art", "Arcane", "LA"),
        ]
        .into_iter()
        .collect();

        let titles: Vec<_> = set.iter().map(|j| (j.title.as_str(), j.project.as_str())).collect();
        assert_eq!(
            titles,
            vec![("Artist", "Arcane"), ("Artist", "Valorant"), ("Writer", "Arcane")]
        );
    }
}
