//! Conversions between `expand.v1` messages and the domain model

use expand_engine::{ExpandTree, NodeType, Subject, SubjectSet};

use super::proto::{self, subject::Ref};
use crate::request::RequestError;

/// Extract the subject set to expand from an `ExpandRequest.subject`
///
/// # Errors
///
/// Returns `MalformedSubject` when the subject is absent, is a plain id, or
/// nests a subject without a `ref`.
pub fn subject_set_from_proto(
    subject: Option<proto::Subject>,
) -> Result<SubjectSet, RequestError> {
    match subject.and_then(|s| s.r#ref) {
        None => Err(RequestError::MalformedSubject("subject is required".to_string())),
        Some(Ref::Id(_)) => Err(RequestError::MalformedSubject(
            "expand requires a subject set".to_string(),
        )),
        Some(Ref::Set(set)) => subject_set(set),
    }
}

fn subject_set(set: proto::SubjectSet) -> Result<SubjectSet, RequestError> {
    let nested = match set.subject {
        None => None,
        Some(nested) => Some(Box::new(match nested.r#ref {
            Some(Ref::Id(id)) => Subject::Id(id),
            Some(Ref::Set(inner)) => Subject::Set(subject_set(inner)?),
            None => {
                return Err(RequestError::MalformedSubject(
                    "malformed nested subject".to_string(),
                ))
            }
        })),
    };

    Ok(SubjectSet {
        namespace: set.namespace,
        object: set.object,
        relation: set.relation,
        subject: nested,
    })
}

impl From<SubjectSet> for proto::SubjectSet {
    fn from(set: SubjectSet) -> Self {
        Self {
            namespace: set.namespace,
            object: set.object,
            relation: set.relation,
            subject: set.subject.map(|s| Box::new(proto::Subject::from(*s))),
        }
    }
}

impl From<Subject> for proto::Subject {
    fn from(subject: Subject) -> Self {
        let r#ref = match subject {
            Subject::Id(id) => Ref::Id(id),
            Subject::Set(set) => Ref::Set(set.into()),
        };
        Self { r#ref: Some(r#ref) }
    }
}

impl From<NodeType> for proto::NodeType {
    fn from(node_type: NodeType) -> Self {
        match node_type {
            NodeType::Union => Self::Union,
            NodeType::Exclusion => Self::Exclusion,
            NodeType::Intersection => Self::Intersection,
            NodeType::Leaf => Self::Leaf,
        }
    }
}

impl From<ExpandTree> for proto::SubTree {
    fn from(tree: ExpandTree) -> Self {
        Self {
            node_type: proto::NodeType::from(tree.node_type).into(),
            subject: Some(tree.subject.into()),
            children: tree.children.into_iter().map(Into::into).collect(),
        }
    }
}
