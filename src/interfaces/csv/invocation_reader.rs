use crate::application::operation::Operation;
use crate::error::{LedgerError, Result};
use std::io::Read;

/// One raw call as it appeared on the wire: a function name and its string arguments.
#[derive(Debug, PartialEq, Clone)]
pub struct Invocation {
    pub operation: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn parse(&self) -> Result<Operation> {
        Operation::parse(&self.operation, self.args.as_slice())
    }
}

/// Reads invocations from a header-less CSV source.
///
/// Each record is `operationName,arg1,arg2,...`. Records may differ in length,
/// fields are trimmed, and lines starting with `#` are skipped.
pub struct InvocationReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> InvocationReader<R> {
    /// Creates a new `InvocationReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .flexible(true)
            .comment(Some(b'#'))
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads invocations.
    pub fn invocations(self) -> impl Iterator<Item = Result<Invocation>> {
        self.reader.into_records().map(|result| {
            let record = result.map_err(LedgerError::from)?;
            let mut fields = record.iter();
            let operation = fields
                .next()
                .filter(|name| !name.is_empty())
                .ok_or_else(|| LedgerError::validation("Missing operation name"))?
                .to_string();
            Ok(Invocation {
                operation,
                args: fields.map(str::to_string).collect(),
            })
        })
    }
}
