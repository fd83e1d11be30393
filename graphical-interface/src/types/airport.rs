/// An airport selectable on the departures board.

#[derive(Debug, Clone, PartialEq)]
pub struct Airport {
    pub code: String,
    pub name: String,
}

impl Airport {
    pub fn new(code: String, name: String) -> Self {
        Self { code, name }
    }
}
