mod catalog;
mod category;
mod document;
mod line;

pub use self::catalog::DocumentType;
pub use self::category::Category;
pub use self::document::Document;
pub use self::line::Line;

fn sanitize(s: impl AsRef<str>) -> String {
    s.as_ref().trim().to_lowercase().replace('/', "").replace('-', "").replace('_', "").replace(' ', "")
}
