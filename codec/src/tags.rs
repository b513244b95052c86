//! Mapping between record tags and quest model enums.

use layout::{BoundaryTag, CriticalEndingTag, EndingTag};
use quest::{Boundary, CriticalSpec, Ending};

/// Builds a critical spec. Legacy records carry no ending byte and always
/// end in failure.
pub(crate) const fn critical_from_tags(
    boundary: BoundaryTag,
    ending: Option<CriticalEndingTag>,
) -> CriticalSpec {
    let boundary = match boundary {
        BoundaryTag::Max => Boundary::Max,
        BoundaryTag::Min => Boundary::Min,
    };
    let ending = match ending {
        Some(CriticalEndingTag::Success) => Ending::Success,
        None | Some(CriticalEndingTag::Failure) => Ending::Failure,
        Some(CriticalEndingTag::Death) => Ending::Death,
    };
    CriticalSpec { boundary, ending }
}

pub(crate) const fn critical_to_tags(spec: CriticalSpec) -> (BoundaryTag, CriticalEndingTag) {
    let boundary = match spec.boundary {
        Boundary::Max => BoundaryTag::Max,
        Boundary::Min => BoundaryTag::Min,
    };
    let ending = match spec.ending {
        Ending::Success => CriticalEndingTag::Success,
        Ending::Failure => CriticalEndingTag::Failure,
        Ending::Death => CriticalEndingTag::Death,
    };
    (boundary, ending)
}

pub(crate) const fn ending_from_tag(tag: EndingTag) -> Option<Ending> {
    match tag {
        EndingTag::None => None,
        EndingTag::Success => Some(Ending::Success),
        EndingTag::Failure => Some(Ending::Failure),
        EndingTag::Death => Some(Ending::Death),
    }
}

pub(crate) const fn ending_to_tag(ending: Option<Ending>) -> EndingTag {
    match ending {
        None => EndingTag::None,
        Some(Ending::Success) => EndingTag::Success,
        Some(Ending::Failure) => EndingTag::Failure,
        Some(Ending::Death) => EndingTag::Death,
    }
}
