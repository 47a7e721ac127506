use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Resources exposed by the list endpoints; used as a metrics label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Customers,
    Employees,
    Suppliers,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Customers => "customers",
            Resource::Employees => "employees",
            Resource::Suppliers => "suppliers",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
