pub mod company_types;
pub mod partner_sales;
pub mod partners;
pub mod products;
