use crate::models::PropertyRecord;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;

pub const HEADER: [&str; 8] = [
    "Location",
    "Other Location Details",
    "Size",
    "Bedrooms",
    "Bathrooms",
    "Price",
    "Property Type",
    "Purchase Type",
];

/// Append-only CSV table of accepted listings
pub struct ResultSink<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl ResultSink<File> {
    pub fn create(path: &str) -> Result<Self> {
        let file = File::create(path).with_context(|| format!("Failed to create {}", path))?;
        Self::new(file).with_context(|| format!("Failed to write header to {}", path))
    }
}

impl<W: Write> ResultSink<W> {
    /// Wrap `inner` and write the header row immediately
    pub fn new(inner: W) -> Result<Self, csv::Error> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(inner);
        writer.write_record(HEADER)?;
        writer.flush()?;
        Ok(Self { writer, rows: 0 })
    }

    pub fn append(&mut self, record: &PropertyRecord) -> Result<(), csv::Error> {
        self.writer.serialize(record)?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and hand back the underlying writer
    pub fn finish(self) -> Result<W, csv::Error> {
        self.writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PropertyType, PurchaseType};

    fn record(location: &str, price: &str) -> PropertyRecord {
        PropertyRecord {
            location: location.to_string(),
            other_location_details: "Dagoretti North, Nairobi".to_string(),
            size: "None".to_string(),
            bedrooms: "3".to_string(),
            bathrooms: "2".to_string(),
            price: price.to_string(),
            property_type: PropertyType::Apartment,
            purchase_type: PurchaseType::Rent,
        }
    }

    #[test]
    fn header_only_when_nothing_appended() {
        let sink = ResultSink::new(Vec::new()).unwrap();
        let out = String::from_utf8(sink.finish().unwrap()).unwrap();
        assert_eq!(
            out,
            "Location,Other Location Details,Size,Bedrooms,Bathrooms,Price,Property Type,Purchase Type\n"
        );
    }

    #[test]
    fn rows_follow_append_order_and_quote_commas() {
        let mut sink = ResultSink::new(Vec::new()).unwrap();
        sink.append(&record("Kilimani", "KSh 85,000")).unwrap();
        sink.append(&record("Kilimani", "KSh 85,000")).unwrap();
        sink.append(&record("Lavington", "None")).unwrap();
        assert_eq!(sink.rows(), 3);

        let out = String::from_utf8(sink.finish().unwrap()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[1],
            r#"Kilimani,"Dagoretti North, Nairobi",None,3,2,"KSh 85,000",Apartment,Rent"#
        );
        assert_eq!(lines[1], lines[2]);
        assert!(lines[3].starts_with("Lavington,"));
        assert!(lines[3].ends_with(",None,Apartment,Rent"));
    }

    #[test]
    fn create_writes_header_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listings.csv");
        let path = path.to_str().unwrap();

        let mut sink = ResultSink::create(path).unwrap();
        sink.append(&record("Karen", "KSh 50,000,000")).unwrap();
        sink.finish().unwrap();

        let contents = std::fs::read_to_string(path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some(HEADER.join(",").as_str()));
        assert!(lines.next().unwrap().starts_with("Karen,"));
        assert_eq!(lines.next(), None);
    }
}
