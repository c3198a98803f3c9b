//! API endpoint declarations
//!
//! An [`Endpoint`] carries everything the generators need to know about one
//! route: method, path, grouping, the declared path/query/body parameters,
//! the required-name set and the declared response shape. Endpoints are
//! constructed through [`Endpoint::builder`] and registered into the
//! [`Registry`](crate::registry::Registry), which keys them by
//! `"{METHOD}_{path}"`.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::{FieldSpec, Schema};

/// HTTP method of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl Method {
    /// Upper-case form used in endpoint keys, e.g. `"GET"`.
    pub fn as_key(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
        }
    }

    /// Lower-case form used for generated harness calls, e.g. `"get"`.
    pub fn as_call(&self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Post => "post",
            Method::Put => "put",
            Method::Delete => "delete",
            Method::Patch => "patch",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

/// Declared success-response shape of an endpoint
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseSpec {
    /// Reference to a registered schema by name, optionally array-flavored:
    /// `"User"` or `"User[]"`
    Schema(String),
    /// Inline field map
    Fields(BTreeMap<String, FieldSpec>),
}

/// One registered API endpoint
#[derive(Debug, Clone)]
pub struct Endpoint {
    /// Registry key, `"{METHOD}_{path}"`
    pub key: String,
    pub method: Method,
    /// Route path with `:name` placeholders, e.g. `"/user/:id"`
    pub path: String,
    /// Display title used in generated doc comments
    pub title: String,
    /// Group key; empty for ungrouped endpoints
    pub group: String,
    /// Path parameters
    pub params: BTreeMap<String, FieldSpec>,
    /// Query-string parameters
    pub query: BTreeMap<String, FieldSpec>,
    /// Body parameters
    pub body: BTreeMap<String, FieldSpec>,
    /// Names required regardless of their field-level flag
    pub required: BTreeSet<String>,
    /// Declared success response, if any
    pub response: Option<ResponseSpec>,
}

impl Endpoint {
    /// Start building an endpoint for the given method and path.
    pub fn builder(method: Method, path: impl Into<String>) -> EndpointBuilder {
        EndpointBuilder::new(method, path)
    }

    /// Registry key for a method + path pair, e.g. `"GET_/base/index"`.
    pub fn key_for(method: Method, path: &str) -> String {
        format!("{}_{}", method.as_key(), path)
    }

    /// All declared parameters merged into one name-sorted map. Path
    /// parameters are inserted first, then query, then body, so a name
    /// declared in several places resolves to the body declaration.
    pub fn all_params(&self) -> BTreeMap<&String, &FieldSpec> {
        let mut merged = BTreeMap::new();
        for source in [&self.params, &self.query, &self.body] {
            for (name, spec) in source {
                merged.insert(name, spec);
            }
        }
        merged
    }

    /// Whether a parameter is required, by the endpoint's required set or
    /// the field's own flag.
    pub fn is_required(&self, name: &str, spec: &FieldSpec) -> bool {
        spec.required || self.required.contains(name)
    }

    /// Names of the declared path parameters, in name order.
    pub fn path_param_names(&self) -> Vec<&str> {
        self.params.keys().map(String::as_str).collect()
    }
}

/// Builder for [`Endpoint`]
pub struct EndpointBuilder {
    method: Method,
    path: String,
    title: String,
    group: String,
    params: BTreeMap<String, FieldSpec>,
    query: BTreeMap<String, FieldSpec>,
    body: BTreeMap<String, FieldSpec>,
    required: BTreeSet<String>,
    response: Option<ResponseSpec>,
}

impl EndpointBuilder {
    /// Create a builder for the given method and path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            title: String::new(),
            group: String::new(),
            params: BTreeMap::new(),
            query: BTreeMap::new(),
            body: BTreeMap::new(),
            required: BTreeSet::new(),
            response: None,
        }
    }

    /// Set the display title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Assign the endpoint to a group.
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Declare a path parameter.
    pub fn param(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.params.insert(name.into(), spec);
        self
    }

    /// Declare a query-string parameter.
    pub fn query(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.query.insert(name.into(), spec);
        self
    }

    /// Declare a body parameter.
    pub fn body(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.body.insert(name.into(), spec);
        self
    }

    /// Mark parameter names as required.
    pub fn required<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required.extend(names.into_iter().map(Into::into));
        self
    }

    /// Declare the response as a reference to a registered schema. Append
    /// `[]` to the name for an array of that schema.
    pub fn response_schema(mut self, name: impl Into<String>) -> Self {
        self.response = Some(ResponseSpec::Schema(name.into()));
        self
    }

    /// Declare the response as an inline field map.
    pub fn response_fields(mut self, schema: Schema) -> Self {
        self.response = Some(ResponseSpec::Fields(schema.fields));
        self
    }

    /// Finish building.
    pub fn build(self) -> Endpoint {
        let key = Endpoint::key_for(self.method, &self.path);
        Endpoint {
            key,
            method: self.method,
            path: self.path,
            title: self.title,
            group: self.group,
            params: self.params,
            query: self.query,
            body: self.body,
            required: self.required,
            response: self.response,
        }
    }
}
