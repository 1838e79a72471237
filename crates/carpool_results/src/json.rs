use std::io::Read;

use crate::proposal::proposal::Proposal;

/// Reads a proposal snapshot, with its matchings, from JSON.
pub fn read_proposal<R: Read>(reader: R) -> Result<Proposal, serde_json::Error> {
    serde_json::from_reader(reader)
}

/// Reads either a single proposal snapshot or an array of them.
pub fn read_proposals<R: Read>(reader: R) -> Result<Vec<Proposal>, serde_json::Error> {
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(Box<Proposal>),
        Many(Vec<Proposal>),
    }

    let parsed: OneOrMany = serde_json::from_reader(reader)?;
    Ok(match parsed {
        OneOrMany::One(proposal) => vec![*proposal],
        OneOrMany::Many(proposals) => proposals,
    })
}
