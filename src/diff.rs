use crate::job::JobRecordSet;

/// Postings in `current` that were never seen before.
pub fn new_jobs(current: &JobRecordSet, ever_seen: &JobRecordSet) -> JobRecordSet {
    current.difference(ever_seen).cloned().collect()
}

/// Postings from the previous snapshot that are no longer listed.
pub fn closed_jobs(previous: &JobRecordSet, current: &JobRecordSet) -> JobRecordSet {
    previous.difference(current).cloned().collect()
}

pub fn union(ever_seen: &JobRecordSet, new_jobs: &JobRecordSet) -> JobRecordSet {
    ever_seen.union(new_jobs).cloned().collect()
}

#[derive(Debug)]
pub struct JobDiff {
    pub new_jobs: JobRecordSet,
    pub closed_jobs: JobRecordSet,
    pub ever_seen: JobRecordSet,
}

impl JobDiff {
    pub fn compute(previous: &JobRecordSet, ever_seen: &JobRecordSet, live: &JobRecordSet) -> Self {
        let new = new_jobs(live, ever_seen);
        Self {
            closed_jobs: closed_jobs(previous, live),
            ever_seen: union(ever_seen, &new),
            new_jobs: new,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.new_jobs.is_empty() && self.closed_jobs.is_empty()
    }
}
