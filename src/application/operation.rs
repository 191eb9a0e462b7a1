use crate::domain::identity::IdentityToken;
use crate::domain::invoice::NewInvoice;
use crate::domain::payment_request::NewPaymentRequest;
use crate::error::{LedgerError, Result};

/// Every call the engine accepts, with arguments already parsed and decoded.
#[derive(Debug, PartialEq, Clone)]
pub enum Operation {
    CreateInvoice(NewInvoice),
    ApproveInvoice {
        number: i32,
        buyer: IdentityToken,
    },
    CreatePaymentRequest(NewPaymentRequest),
    AssignPaymentRequest {
        id: i32,
        payer_id: i32,
        payer: IdentityToken,
    },
    InvoiceInfo {
        number: i32,
        buyer: IdentityToken,
    },
    PaymentInfo {
        id: i32,
        payer_id: i32,
        payer: IdentityToken,
    },
}

impl Operation {
    pub const CREATE_INVOICE: &'static str = "createInvoice";
    pub const APPROVE_INVOICE: &'static str = "approveInvoice";
    pub const CREATE_PAYMENT_REQUEST: &'static str = "createPaymentRequest";
    pub const ASSIGN_PAYMENT_REQUEST: &'static str = "assignPaymentRequest";
    pub const INVOICE_INFO: &'static str = "invoice_info";
    pub const PAYMENT_INFO: &'static str = "payment_info";

    /// Builds an operation from its wire name and positional string arguments.
    ///
    /// Arity is exact. Identity arguments are base64 on the wire.
    pub fn parse<S: AsRef<str>>(name: &str, args: &[S]) -> Result<Self> {
        let args = Args::new(name, args);
        match name {
            Self::CREATE_INVOICE => {
                args.expect_len(7)?;
                Ok(Operation::CreateInvoice(NewInvoice::new(
                    args.int(0, "invoice number")?,
                    args.int(1, "invoice price")?,
                    args.text(2),
                    args.int(3, "invoice supplierId")?,
                    args.int(4, "invoice buyerId")?,
                    args.identity(5, "supplier")?,
                    args.identity(6, "buyer")?,
                )))
            }
            Self::APPROVE_INVOICE => {
                args.expect_len(2)?;
                Ok(Operation::ApproveInvoice {
                    number: args.int(0, "invoice number")?,
                    buyer: args.identity(1, "buyer")?,
                })
            }
            Self::CREATE_PAYMENT_REQUEST => {
                args.expect_len(5)?;
                Ok(Operation::CreatePaymentRequest(NewPaymentRequest {
                    id: args.int(0, "payment request id")?,
                    invoice: args.int(1, "invoice number")?,
                    discount_rate: args.int(2, "discountRate")?,
                    request_date: args.text(3),
                    requester: args.identity(4, "buyer")?,
                }))
            }
            Self::ASSIGN_PAYMENT_REQUEST => {
                args.expect_len(3)?;
                Ok(Operation::AssignPaymentRequest {
                    id: args.int(0, "payment request id")?,
                    payer_id: args.int(1, "payer id")?,
                    payer: args.identity(2, "payer")?,
                })
            }
            Self::INVOICE_INFO => {
                args.expect_len(2)?;
                Ok(Operation::InvoiceInfo {
                    number: args.int(0, "invoice number")?,
                    buyer: args.identity(1, "buyer")?,
                })
            }
            Self::PAYMENT_INFO => {
                args.expect_len(3)?;
                Ok(Operation::PaymentInfo {
                    id: args.int(0, "payment id")?,
                    payer_id: args.int(1, "payer id")?,
                    payer: args.identity(2, "payer")?,
                })
            }
            other => Err(LedgerError::validation(format!(
                "Received unknown function invocation: {other}"
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::CreateInvoice(_) => Self::CREATE_INVOICE,
            Operation::ApproveInvoice { .. } => Self::APPROVE_INVOICE,
            Operation::CreatePaymentRequest(_) => Self::CREATE_PAYMENT_REQUEST,
            Operation::AssignPaymentRequest { .. } => Self::ASSIGN_PAYMENT_REQUEST,
            Operation::InvoiceInfo { .. } => Self::INVOICE_INFO,
            Operation::PaymentInfo { .. } => Self::PAYMENT_INFO,
        }
    }

    /// Reads never write to either table.
    pub fn is_read(&self) -> bool {
        matches!(
            self,
            Operation::InvoiceInfo { .. } | Operation::PaymentInfo { .. }
        )
    }
}

struct Args<'a, S> {
    operation: &'a str,
    values: &'a [S],
}

impl<'a, S: AsRef<str>> Args<'a, S> {
    fn new(operation: &'a str, values: &'a [S]) -> Self {
        Self { operation, values }
    }

    fn expect_len(&self, expected: usize) -> Result<()> {
        if self.values.len() != expected {
            return Err(LedgerError::validation(format!(
                "Incorrect number of arguments for {}. Expecting {expected}, got {}",
                self.operation,
                self.values.len()
            )));
        }
        Ok(())
    }

    fn text(&self, index: usize) -> String {
        self.values[index].as_ref().to_string()
    }

    fn int(&self, index: usize, field: &str) -> Result<i32> {
        self.values[index]
            .as_ref()
            .trim()
            .parse()
            .map_err(|_| LedgerError::validation(format!("Expecting integer value for {field}")))
    }

    fn identity(&self, index: usize, field: &str) -> Result<IdentityToken> {
        IdentityToken::from_base64(field, self.values[index].as_ref().trim())
    }
}
