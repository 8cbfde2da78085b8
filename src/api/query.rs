//! Document search queries.
//!
//! A [`Query`] renders to the content API's search parameters:
//!
//! ```text
//! q=[[at(document.type,"post")]]
//! fetch=post.title,post.subtitle,post.author
//! pageSize=1
//! page=1
//! after=YFzA
//! orderings=[document.first_publication_date desc]
//! ```

/// A single search predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Exact match of a field path against a value.
    At { path: String, value: String },
}

impl Predicate {
    pub fn at(path: impl Into<String>, value: impl Into<String>) -> Self {
        Predicate::At {
            path: path.into(),
            value: value.into(),
        }
    }

    /// Match documents of a custom type.
    pub fn document_type(doc_type: &str) -> Self {
        Self::at("document.type", doc_type)
    }

    /// Match a document by its uid within a custom type.
    pub fn uid(doc_type: &str, uid: &str) -> Self {
        Self::at(format!("my.{doc_type}.uid"), uid)
    }

    /// Render as `[at(path,"value")]`.
    pub fn render(&self) -> String {
        match self {
            Predicate::At { path, value } => {
                format!("[at({},\"{}\")]", path, value.replace('"', "\\\""))
            }
        }
    }
}

/// One sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    pub field: String,
    pub descending: bool,
}

impl Ordering {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }
}

pub const FIRST_PUBLICATION_DATE: &str = "document.first_publication_date";
pub const LAST_PUBLICATION_DATE: &str = "document.last_publication_date";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub predicates: Vec<Predicate>,
    /// Restrict returned `data` to these `type.field` names. Empty = all fields.
    pub fetch: Vec<String>,
    pub page_size: u32,
    /// 1-based page number.
    pub page: u32,
    /// Only return documents that come after this document id.
    pub after: Option<String>,
    pub orderings: Vec<Ordering>,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            predicates: Vec::new(),
            fetch: Vec::new(),
            page_size: 20,
            page: 1,
            after: None,
            orderings: Vec::new(),
        }
    }
}

impl Query {
    pub fn new(predicate: Predicate) -> Self {
        Self {
            predicates: vec![predicate],
            ..Default::default()
        }
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn fetch<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fetch = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn after(mut self, id: impl Into<String>) -> Self {
        self.after = Some(id.into());
        self
    }

    pub fn order_by(mut self, ordering: Ordering) -> Self {
        self.orderings.push(ordering);
        self
    }

    /// The `q` parameter: every predicate, wrapped in an outer bracket.
    pub fn render_q(&self) -> String {
        let inner: String = self.predicates.iter().map(Predicate::render).collect();
        format!("[{inner}]")
    }

    /// The `orderings` parameter, if any orderings are set.
    pub fn render_orderings(&self) -> Option<String> {
        if self.orderings.is_empty() {
            return None;
        }
        let keys: Vec<String> = self
            .orderings
            .iter()
            .map(|o| {
                if o.descending {
                    format!("{} desc", o.field)
                } else {
                    o.field.clone()
                }
            })
            .collect();
        Some(format!("[{}]", keys.join(",")))
    }

    /// All search parameters in request order.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("q", self.render_q())];
        if !self.fetch.is_empty() {
            params.push(("fetch", self.fetch.join(",")));
        }
        params.push(("pageSize", self.page_size.to_string()));
        params.push(("page", self.page.to_string()));
        if let Some(after) = &self.after {
            params.push(("after", after.clone()));
        }
        if let Some(orderings) = self.render_orderings() {
            params.push(("orderings", orderings));
        }
        params
    }
}
