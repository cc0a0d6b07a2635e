use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::{EngineError, Result};

/// The set of subjects holding `relation` on `namespace:object`
///
/// A subject set may carry a nested subject. It is part of the request as
/// received and is passed to the engine untouched; [`TupleExpandEngine`]
/// expands on namespace, object and relation only. Transports construct a
/// fresh value per request; it is never mutated afterwards.
///
/// [`TupleExpandEngine`]: crate::TupleExpandEngine
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SubjectSet {
    pub namespace: String,
    pub object: String,
    pub relation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<Box<Subject>>,
}

impl SubjectSet {
    pub fn new(namespace: &str, object: &str, relation: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            object: object.to_string(),
            relation: relation.to_string(),
            subject: None,
        }
    }

    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subject = Some(Box::new(subject));
        self
    }
}

impl fmt::Display for SubjectSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}#{}", self.namespace, self.object, self.relation)
    }
}

impl FromStr for SubjectSet {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let (namespace, rest) = s
            .split_once(':')
            .ok_or_else(|| EngineError::InvalidSubject(format!("{s:?}: expected namespace:object#relation")))?;
        let (object, relation) = rest
            .split_once('#')
            .ok_or_else(|| EngineError::InvalidSubject(format!("{s:?}: expected namespace:object#relation")))?;

        Ok(Self::new(namespace, object, relation))
    }
}

/// A subject: a plain identifier or a subject set
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Subject {
    Id(String),
    Set(SubjectSet),
}

impl Subject {
    pub fn id(id: &str) -> Self {
        Self::Id(id.to_string())
    }

    pub fn set(namespace: &str, object: &str, relation: &str) -> Self {
        Self::Set(SubjectSet::new(namespace, object, relation))
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => f.write_str(id),
            Self::Set(set) => set.fmt(f),
        }
    }
}

impl FromStr for Subject {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(EngineError::InvalidSubject("subject must not be empty".to_string()));
        }
        if s.contains('#') {
            return s.parse().map(Self::Set);
        }
        Ok(Self::Id(s.to_string()))
    }
}

impl From<Subject> for String {
    fn from(subject: Subject) -> Self {
        subject.to_string()
    }
}

impl TryFrom<String> for Subject {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// A stored relationship: `namespace:object#relation@subject`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationTuple {
    pub namespace: String,
    pub object: String,
    pub relation: String,
    pub subject: Subject,
}

impl RelationTuple {
    pub fn new(set: SubjectSet, subject: Subject) -> Self {
        Self {
            namespace: set.namespace,
            object: set.object,
            relation: set.relation,
            subject,
        }
    }

    /// The subject set this tuple contributes a member to
    pub fn subject_set(&self) -> SubjectSet {
        SubjectSet::new(&self.namespace, &self.object, &self.relation)
    }
}

impl fmt::Display for RelationTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}#{}@{}",
            self.namespace, self.object, self.relation, self.subject
        )
    }
}

impl FromStr for RelationTuple {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let (set, subject) = s
            .split_once('@')
            .ok_or_else(|| EngineError::InvalidTuple(format!("{s:?}: missing '@subject'")))?;
        let set: SubjectSet = set
            .parse()
            .map_err(|e| EngineError::InvalidTuple(format!("{s:?}: {e}")))?;
        let subject: Subject = subject
            .parse()
            .map_err(|e| EngineError::InvalidTuple(format!("{s:?}: {e}")))?;

        Ok(Self::new(set, subject))
    }
}

/// Tuple filter; `None` values act as wildcards
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TupleQuery {
    pub namespace: Option<String>,
    pub object: Option<String>,
    pub relation: Option<String>,
}

impl TupleQuery {
    pub fn matches(&self, tuple: &RelationTuple) -> bool {
        self.namespace.as_ref().map_or(true, |ns| *ns == tuple.namespace)
            && self.object.as_ref().map_or(true, |obj| *obj == tuple.object)
            && self.relation.as_ref().map_or(true, |rel| *rel == tuple.relation)
    }
}

impl From<&SubjectSet> for TupleQuery {
    fn from(set: &SubjectSet) -> Self {
        Self {
            namespace: Some(set.namespace.clone()),
            object: Some(set.object.clone()),
            relation: Some(set.relation.clone()),
        }
    }
}

/// Kind of an expansion tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Union,
    Exclusion,
    Intersection,
    Leaf,
}

/// Expansion result: a node and the subtrees reachable from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExpandTree {
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// `namespace:object#relation` for subject sets, the bare id otherwise
    #[schema(value_type = String, example = "docs:file1#viewer")]
    pub subject: Subject,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[schema(no_recursion)]
    pub children: Vec<ExpandTree>,
}

impl ExpandTree {
    pub fn leaf(subject: Subject) -> Self {
        Self {
            node_type: NodeType::Leaf,
            subject,
            children: Vec::new(),
        }
    }

    pub fn union(subject: Subject, children: Vec<ExpandTree>) -> Self {
        Self {
            node_type: NodeType::Union,
            subject,
            children,
        }
    }
}
