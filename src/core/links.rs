//! Source links
//!
//! Builds the hosted-viewer URL for a result line. A record's first path
//! segment names its project; the rest is the path inside the repository.

use crate::core::model::{Project, ResultRecord};
use crate::core::tree::segments;

/// Base blob URL for a project, e.g. `https://github.com/owner/name/blob/master`
pub fn blob_base(project: &Project) -> String {
    format!(
        "https://{}.com/{}/{}/blob/master",
        project.company, project.owner, project.name
    )
}

/// Link to `record`'s line, resolving the project by its first path segment
pub fn source_url(record: &ResultRecord, projects: &[Project]) -> Option<String> {
    let project_name = record.project_name()?;
    let project = projects.iter().find(|p| p.name == project_name)?;
    let rest: Vec<&str> = segments(&record.path).skip(1).collect();
    if rest.is_empty() {
        return None;
    }
    Some(format!(
        "{}/{}#L{}",
        blob_base(project),
        rest.join("/"),
        record.line
    ))
}
