//! Wire messages of the `expand.v1` package
//!
//! Declared by hand with prost derives; the service stubs for
//! `ExpandService` are generated by `build.rs` and included at the bottom.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SubjectSet {
    #[prost(string, tag = "1")]
    pub namespace: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub object: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub relation: ::prost::alloc::string::String,
    /// Optional nested subject narrowing the set
    #[prost(message, optional, boxed, tag = "4")]
    pub subject: ::core::option::Option<::prost::alloc::boxed::Box<Subject>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Subject {
    #[prost(oneof = "subject::Ref", tags = "1, 2")]
    pub r#ref: ::core::option::Option<subject::Ref>,
}

pub mod subject {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Ref {
        #[prost(string, tag = "1")]
        Id(::prost::alloc::string::String),
        #[prost(message, tag = "2")]
        Set(super::SubjectSet),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExpandRequest {
    #[prost(message, optional, tag = "1")]
    pub subject: ::core::option::Option<Subject>,
    #[prost(int32, tag = "2")]
    pub max_depth: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExpandResponse {
    #[prost(message, optional, tag = "1")]
    pub tree: ::core::option::Option<SubTree>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SubTree {
    #[prost(enumeration = "NodeType", tag = "1")]
    pub node_type: i32,
    #[prost(message, optional, tag = "2")]
    pub subject: ::core::option::Option<Subject>,
    #[prost(message, repeated, tag = "3")]
    pub children: ::prost::alloc::vec::Vec<SubTree>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum NodeType {
    Unspecified = 0,
    Union = 1,
    Exclusion = 2,
    Intersection = 3,
    Leaf = 4,
}

include!(concat!(env!("OUT_DIR"), "/expand.v1.ExpandService.rs"));
