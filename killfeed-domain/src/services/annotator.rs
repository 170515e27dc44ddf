use crate::value_objects::{Marker, Relevancy};

/// Reactions to attach once the notification is posted.
pub fn markers_for(relevancy: Relevancy) -> Vec<Marker> {
    match relevancy {
        Relevancy::Lossmail => vec![Marker::RegionalIndicatorF],
        Relevancy::Killmail | Relevancy::Irrelevant => Vec::new(),
    }
}
