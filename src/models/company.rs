use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::company::{
    Company as DomainCompany, NewCompany as DomainNewCompany,
    UpdateCompanyBilling as DomainUpdateCompanyBilling,
};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::companies)]
/// Diesel model for [`crate::domain::company::Company`].
pub struct Company {
    pub id: i32,
    pub public_id: String,
    pub name: String,
    pub plan_id: Option<i32>,
    pub billing_customer_id: Option<String>,
    pub billing_subscription_id: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::companies)]
/// Insertable form of [`Company`].
pub struct NewCompany<'a> {
    pub public_id: String,
    pub name: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::companies)]
/// Billing columns updated after the subscription flow.
pub struct UpdateCompanyBilling<'a> {
    pub plan_id: Option<i32>,
    pub billing_customer_id: Option<&'a str>,
    pub billing_subscription_id: Option<&'a str>,
}

impl TryFrom<Company> for DomainCompany {
    type Error = TypeConstraintError;

    fn try_from(company: Company) -> Result<Self, Self::Error> {
        let public_id = Uuid::parse_str(&company.public_id)
            .map_err(|_| TypeConstraintError::InvalidValue("invalid public id".to_string()))?;
        Ok(Self {
            id: company.id,
            public_id,
            name: company.name,
            plan_id: company.plan_id,
            billing_customer_id: company.billing_customer_id,
            billing_subscription_id: company.billing_subscription_id,
            created_at: company.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewCompany> for NewCompany<'a> {
    fn from(company: &'a DomainNewCompany) -> Self {
        Self {
            public_id: company.public_id.to_string(),
            name: company.name.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateCompanyBilling> for UpdateCompanyBilling<'a> {
    fn from(update: &'a DomainUpdateCompanyBilling) -> Self {
        Self {
            plan_id: update.plan_id,
            billing_customer_id: update.billing_customer_id.as_deref(),
            billing_subscription_id: update.billing_subscription_id.as_deref(),
        }
    }
}
