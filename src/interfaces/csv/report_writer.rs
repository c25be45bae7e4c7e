use crate::error::Result;
use crate::interfaces::report::Report;
use std::io::Write;

const PRODUCT_HEADERS: [&str; 5] = ["product", "name", "quantity", "price", "description"];
const CUSTOMER_HEADERS: [&str; 5] = ["customer", "name", "orders", "cart_lines", "total_owed"];

/// Writes a [`Report`] as two CSV tables (products, then customers) separated
/// by a blank line, or as a single JSON document.
pub struct ReportWriter<W: Write> {
    out: W,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn write_csv(&mut self, report: &Report) -> Result<()> {
        {
            let mut wtr = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(&mut self.out);
            wtr.write_record(PRODUCT_HEADERS)?;
            for row in &report.products {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        writeln!(self.out)?;
        {
            let mut wtr = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(&mut self.out);
            wtr.write_record(CUSTOMER_HEADERS)?;
            for row in &report.customers {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        Ok(())
    }

    pub fn write_json(&mut self, report: &Report) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, report)?;
        writeln!(self.out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::payment::PaymentPolicy;
    use crate::domain::customer::CustomerKey;
    use crate::domain::product::ProductId;
    use crate::interfaces::report::{CustomerRow, ProductRow};
    use rust_decimal_macros::dec;

    fn report() -> Report {
        Report {
            policy: PaymentPolicy::LatestPerProduct,
            products: vec![ProductRow {
                product: ProductId(1),
                name: "Book".to_string(),
                quantity: 5,
                price: dec!(9.99),
                description: "d".to_string(),
            }],
            customers: vec![CustomerRow {
                customer: CustomerKey::new("alice"),
                name: "Alice".to_string(),
                orders: 2,
                cart_lines: 1,
                total_owed: Some(dec!(19.98)),
            }],
        }
    }

    #[test]
    fn test_write_csv() {
        let mut buf = Vec::new();
        ReportWriter::new(&mut buf).write_csv(&report()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "product,name,quantity,price,description\n1,Book,5,9.99,d\n\n\
             customer,name,orders,cart_lines,total_owed\nalice,Alice,2,1,19.98\n"
        );
    }

    #[test]
    fn test_write_csv_empty_tables_keep_headers() {
        let empty = Report {
            policy: PaymentPolicy::Cumulative,
            products: Vec::new(),
            customers: Vec::new(),
        };
        let mut buf = Vec::new();
        ReportWriter::new(&mut buf).write_csv(&empty).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("product,name,quantity,price,description\n"));
        assert!(text.ends_with("customer,name,orders,cart_lines,total_owed\n"));
    }

    #[test]
    fn test_write_csv_unpriced_total_is_empty() {
        let mut report = report();
        report.customers[0].total_owed = None;
        let mut buf = Vec::new();
        ReportWriter::new(&mut buf).write_csv(&report).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with("alice,Alice,2,1,\n"));
    }

    #[test]
    fn test_write_json() {
        let mut buf = Vec::new();
        ReportWriter::new(&mut buf).write_json(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["policy"], "latest_per_product");
        assert_eq!(value["customers"][0]["customer"], "alice");
        assert_eq!(value["customers"][0]["total_owed"], "19.98");
    }
}
