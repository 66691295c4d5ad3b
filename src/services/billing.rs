//! Commercial operations: the admin catalogue of plans, coupons and
//! affiliates, plus the company-facing subscription flow against the payment
//! proxy.

use crate::billing::{BillingApi, CreateCustomer, CreateSubscription};
use crate::domain::company::UpdateCompanyBilling;
use crate::domain::types::{AffiliateId, CompanyId, CouponId, PlanId};
use crate::dto::billing::{AffiliateRow, BillingOverview, CouponRow, PlanRow};
use crate::forms::billing::{AddAffiliateForm, AddCouponForm, SavePlanForm, SubscribeForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{
    AffiliateReader, AffiliateWriter, CompanyReader, CompanyWriter, CouponReader, CouponWriter,
    PlanReader, PlanWriter,
};
use crate::routes::check_role;
use crate::services::{ServiceError, ServiceResult};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Lists all subscription plans for the admin page.
pub fn list_plans<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<PlanRow>>
where
    R: PlanReader + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let plans = repo.list_plans()?;
    Ok(plans.iter().map(PlanRow::from).collect())
}

/// Creates a plan, or updates it when the form carries an id.
pub fn save_plan<R>(repo: &R, user: &AuthenticatedUser, form: &SavePlanForm) -> ServiceResult<()>
where
    R: PlanWriter + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_plan = form.to_new_plan().map_err(|err| {
        log::error!("Failed to validate form: {err}");
        ServiceError::Form("Dados do plano inválidos".to_string())
    })?;

    match form.id {
        Some(id) => {
            repo.update_plan(PlanId::new(id)?, &new_plan)?;
        }
        None => {
            repo.create_plan(&new_plan)?;
        }
    }

    Ok(())
}

/// Deletes a plan from the catalogue.
pub fn delete_plan<R>(repo: &R, user: &AuthenticatedUser, plan_id: i32) -> ServiceResult<()>
where
    R: PlanWriter + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.delete_plan(PlanId::new(plan_id)?)?;
    Ok(())
}

/// Lists issued coupons with the affiliate they are credited to.
pub fn list_coupons<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<CouponRow>>
where
    R: CouponReader + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let coupons = repo.list_coupons()?;
    Ok(coupons
        .iter()
        .map(|(coupon, affiliate)| {
            CouponRow::new(coupon, affiliate.as_ref().map(|a| a.name.clone()))
        })
        .collect())
}

/// Issues a coupon with a generated code.
pub fn add_coupon<R>(repo: &R, user: &AuthenticatedUser, form: &AddCouponForm) -> ServiceResult<()>
where
    R: CouponWriter + AffiliateReader + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_coupon = form.to_new_coupon().map_err(|err| {
        log::error!("Failed to validate form: {err}");
        ServiceError::Form("Dados do cupom inválidos".to_string())
    })?;

    if let Some(affiliate_id) = new_coupon.affiliate_id {
        if repo.get_affiliate_by_id(AffiliateId::new(affiliate_id)?)?.is_none() {
            return Err(ServiceError::Form("Afiliado não encontrado".to_string()));
        }
    }

    repo.create_coupon(&new_coupon)?;
    Ok(())
}

/// Retires a coupon; existing subscriptions keep their discount.
pub fn deactivate_coupon<R>(repo: &R, user: &AuthenticatedUser, coupon_id: i32) -> ServiceResult<()>
where
    R: CouponWriter + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.deactivate_coupon(CouponId::new(coupon_id)?)?;
    Ok(())
}

/// Lists affiliates with the coupons credited to them.
pub fn list_affiliates<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<AffiliateRow>>
where
    R: AffiliateReader + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let affiliates = repo.list_affiliates()?;
    Ok(affiliates
        .iter()
        .map(|(affiliate, coupons)| AffiliateRow::new(affiliate, coupons))
        .collect())
}

/// Registers an affiliate partner.
pub fn add_affiliate<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &AddAffiliateForm,
) -> ServiceResult<()>
where
    R: AffiliateWriter + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_affiliate = form.to_new_affiliate().map_err(|err| {
        log::error!("Failed to validate form: {err}");
        ServiceError::Form("Dados do afiliado inválidos".to_string())
    })?;

    repo.create_affiliate(&new_affiliate)?;
    Ok(())
}

/// Assembles the billing tab of the company settings.
pub async fn billing_overview<R, B>(
    repo: &R,
    api: &B,
    user: &AuthenticatedUser,
) -> ServiceResult<BillingOverview>
where
    R: CompanyReader + PlanReader + ?Sized,
    B: BillingApi,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let company = repo
        .get_company_by_id(CompanyId::new(user.company_id)?)?
        .ok_or(ServiceError::NotFound)?;

    let plan_name = match company.plan_id {
        Some(id) => repo.get_plan_by_id(PlanId::new(id)?)?.map(|plan| plan.name),
        None => None,
    };

    let (subscription_status, invoice_url) = match company.billing_subscription_id.as_deref() {
        Some(subscription_id) => {
            let subscription = api.subscription_status(subscription_id).await?;
            let invoice = api.latest_invoice_url(subscription_id).await?;
            (Some(subscription.status), invoice)
        }
        None => (None, None),
    };

    Ok(BillingOverview {
        plan_name,
        subscription_status,
        invoice_url,
    })
}

/// Subscribes the company to a plan, registering it as a provider customer
/// first when needed. An optional coupon code applies its discount.
pub async fn subscribe<R, B>(
    repo: &R,
    api: &B,
    user: &AuthenticatedUser,
    form: &SubscribeForm,
) -> ServiceResult<()>
where
    R: CompanyReader + CompanyWriter + PlanReader + CouponReader + ?Sized,
    B: BillingApi,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let company_id = CompanyId::new(user.company_id)?;
    let company = repo
        .get_company_by_id(company_id)?
        .ok_or(ServiceError::NotFound)?;

    let plan = repo
        .get_plan_by_id(PlanId::new(form.plan_id)?)?
        .ok_or(ServiceError::NotFound)?;

    let discount_percent = match form
        .coupon_code
        .as_deref()
        .map(str::trim)
        .filter(|code| !code.is_empty())
    {
        Some(code) => {
            let coupon = repo
                .get_coupon_by_code(&code.to_uppercase())?
                .filter(|coupon| coupon.active)
                .ok_or_else(|| ServiceError::Form("Cupom inválido ou expirado".to_string()))?;
            Some(coupon.discount_percent)
        }
        None => None,
    };

    let customer_id = match company.billing_customer_id.clone() {
        Some(id) => id,
        None => {
            let customer = api
                .create_customer(&CreateCustomer {
                    reference: company.public_id.to_string(),
                    name: company.name.clone(),
                    email: user.email.clone(),
                })
                .await?;
            // Persisted before the subscription call; a retry after a failed
            // subscription must reuse this customer, not register another.
            repo.update_company_billing(
                company_id,
                &UpdateCompanyBilling {
                    plan_id: None,
                    billing_customer_id: Some(customer.id.clone()),
                    billing_subscription_id: None,
                },
            )?;
            customer.id
        }
    };

    let subscription = api
        .create_subscription(&CreateSubscription {
            customer_id: customer_id.clone(),
            plan_code: plan.provider_plan_code.clone(),
            discount_percent,
        })
        .await?;

    repo.update_company_billing(
        company_id,
        &UpdateCompanyBilling {
            plan_id: Some(plan.id),
            billing_customer_id: Some(customer_id),
            billing_subscription_id: Some(subscription.id),
        },
    )
    .map_err(|err| {
        log::error!("Subscription created but not persisted: {err}");
        ServiceError::from(err)
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::billing::{BillingError, BillingResult, Customer, Subscription};
    use crate::domain::billing::{Coupon, Plan};
    use crate::domain::company::Company;
    use crate::repository::mock::MockRepository;

    fn user(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "owner@example.com".to_string(),
            name: "Owner".to_string(),
            company_id: 7,
            roles: roles.iter().map(ToString::to_string).collect(),
            exp: usize::MAX,
        }
    }

    fn company(customer_id: Option<&str>) -> Company {
        Company {
            id: 7,
            public_id: Uuid::new_v4(),
            name: "Loja da Ana".to_string(),
            plan_id: None,
            billing_customer_id: customer_id.map(ToString::to_string),
            billing_subscription_id: None,
            created_at: Utc::now().naive_utc(),
        }
    }

    fn plan() -> Plan {
        Plan {
            id: 2,
            name: "Pro".to_string(),
            price_cents: 9900,
            max_chats: 100,
            provider_plan_code: "pro-monthly".to_string(),
            created_at: Utc::now().naive_utc(),
        }
    }

    /// Records the subscription request it receives.
    #[derive(Default)]
    struct FakeBilling {
        subscriptions: Mutex<Vec<CreateSubscription>>,
        customers: Mutex<Vec<CreateCustomer>>,
        fail_subscription: bool,
    }

    impl BillingApi for FakeBilling {
        async fn create_customer(&self, request: &CreateCustomer) -> BillingResult<Customer> {
            self.customers.lock().unwrap().push(request.clone());
            Ok(Customer {
                id: "cus_1".to_string(),
            })
        }

        async fn create_subscription(
            &self,
            request: &CreateSubscription,
        ) -> BillingResult<Subscription> {
            if self.fail_subscription {
                return Err(BillingError::Api {
                    status: 502,
                    message: "provider unavailable".to_string(),
                });
            }
            self.subscriptions.lock().unwrap().push(request.clone());
            Ok(Subscription {
                id: "sub_1".to_string(),
                status: "active".to_string(),
            })
        }

        async fn subscription_status(&self, _subscription_id: &str) -> BillingResult<Subscription> {
            Ok(Subscription {
                id: "sub_1".to_string(),
                status: "active".to_string(),
            })
        }

        async fn latest_invoice_url(
            &self,
            _subscription_id: &str,
        ) -> BillingResult<Option<String>> {
            Ok(Some("https://pay.example.com/inv_1".to_string()))
        }
    }

    #[test]
    fn admin_pages_reject_the_plain_access_role() {
        let repo = MockRepository::new();
        let user = user(&[SERVICE_ACCESS_ROLE]);

        assert!(matches!(
            list_plans(&repo, &user),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn coupon_for_unknown_affiliate_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_get_affiliate_by_id().returning(|_| Ok(None));

        let form = AddCouponForm {
            discount_percent: 10,
            affiliate_id: Some(42),
        };

        assert!(matches!(
            add_coupon(&repo, &user(&[SERVICE_ADMIN_ROLE]), &form),
            Err(ServiceError::Form(_))
        ));
    }

    #[tokio::test]
    async fn subscribe_registers_the_customer_once() {
        let mut repo = MockRepository::new();
        repo.expect_get_company_by_id()
            .returning(|_| Ok(Some(company(None))));
        repo.expect_get_plan_by_id().returning(|_| Ok(Some(plan())));

        // The customer id is stored on its own before the subscription call.
        let mut order = mockall::Sequence::new();
        repo.expect_update_company_billing()
            .withf(|company_id, updates| {
                company_id.get() == 7
                    && updates.billing_customer_id.as_deref() == Some("cus_1")
                    && updates.billing_subscription_id.is_none()
                    && updates.plan_id.is_none()
            })
            .times(1)
            .in_sequence(&mut order)
            .returning(|_, _| Ok(company(Some("cus_1"))));
        repo.expect_update_company_billing()
            .withf(|company_id, updates| {
                company_id.get() == 7
                    && updates.billing_customer_id.as_deref() == Some("cus_1")
                    && updates.billing_subscription_id.as_deref() == Some("sub_1")
                    && updates.plan_id == Some(2)
            })
            .times(1)
            .in_sequence(&mut order)
            .returning(|_, _| Ok(company(Some("cus_1"))));

        let api = FakeBilling::default();
        let form = SubscribeForm {
            plan_id: 2,
            coupon_code: None,
        };

        subscribe(&repo, &api, &user(&[SERVICE_ACCESS_ROLE]), &form)
            .await
            .unwrap();
        assert_eq!(api.customers.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn customer_id_survives_a_failed_subscription() {
        let mut repo = MockRepository::new();
        repo.expect_get_company_by_id()
            .returning(|_| Ok(Some(company(None))));
        repo.expect_get_plan_by_id().returning(|_| Ok(Some(plan())));
        repo.expect_update_company_billing()
            .withf(|_, updates| {
                updates.billing_customer_id.as_deref() == Some("cus_1")
                    && updates.billing_subscription_id.is_none()
            })
            .times(1)
            .returning(|_, _| Ok(company(Some("cus_1"))));

        let api = FakeBilling {
            fail_subscription: true,
            ..FakeBilling::default()
        };
        let form = SubscribeForm {
            plan_id: 2,
            coupon_code: None,
        };

        assert!(matches!(
            subscribe(&repo, &api, &user(&[SERVICE_ACCESS_ROLE]), &form).await,
            Err(ServiceError::Billing(_))
        ));
    }

    #[tokio::test]
    async fn existing_customer_is_reused() {
        let mut repo = MockRepository::new();
        repo.expect_get_company_by_id()
            .returning(|_| Ok(Some(company(Some("cus_9")))));
        repo.expect_get_plan_by_id().returning(|_| Ok(Some(plan())));
        repo.expect_update_company_billing()
            .returning(|_, _| Ok(company(Some("cus_9"))));

        let api = FakeBilling::default();
        let form = SubscribeForm {
            plan_id: 2,
            coupon_code: None,
        };

        subscribe(&repo, &api, &user(&[SERVICE_ACCESS_ROLE]), &form)
            .await
            .unwrap();
        assert!(api.customers.lock().unwrap().is_empty());
        assert_eq!(
            api.subscriptions.lock().unwrap()[0].customer_id,
            "cus_9".to_string()
        );
    }

    #[tokio::test]
    async fn coupon_discount_reaches_the_provider() {
        let mut repo = MockRepository::new();
        repo.expect_get_company_by_id()
            .returning(|_| Ok(Some(company(Some("cus_9")))));
        repo.expect_get_plan_by_id().returning(|_| Ok(Some(plan())));
        repo.expect_get_coupon_by_code()
            .withf(|code| code == "DESC10AB")
            .returning(|code| {
                Ok(Some(Coupon {
                    id: 1,
                    code: code.to_string(),
                    discount_percent: 10,
                    affiliate_id: None,
                    active: true,
                    created_at: Utc::now().naive_utc(),
                }))
            });
        repo.expect_update_company_billing()
            .returning(|_, _| Ok(company(Some("cus_9"))));

        let api = FakeBilling::default();
        let form = SubscribeForm {
            plan_id: 2,
            coupon_code: Some("desc10ab".to_string()),
        };

        subscribe(&repo, &api, &user(&[SERVICE_ACCESS_ROLE]), &form)
            .await
            .unwrap();
        assert_eq!(
            api.subscriptions.lock().unwrap()[0].discount_percent,
            Some(10)
        );
    }

    #[tokio::test]
    async fn inactive_coupon_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_get_company_by_id()
            .returning(|_| Ok(Some(company(Some("cus_9")))));
        repo.expect_get_plan_by_id().returning(|_| Ok(Some(plan())));
        repo.expect_get_coupon_by_code().returning(|code| {
            Ok(Some(Coupon {
                id: 1,
                code: code.to_string(),
                discount_percent: 10,
                affiliate_id: None,
                active: false,
                created_at: Utc::now().naive_utc(),
            }))
        });

        let api = FakeBilling::default();
        let form = SubscribeForm {
            plan_id: 2,
            coupon_code: Some("DESC10AB".to_string()),
        };

        assert!(matches!(
            subscribe(&repo, &api, &user(&[SERVICE_ACCESS_ROLE]), &form).await,
            Err(ServiceError::Form(_))
        ));
        assert!(api.subscriptions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn overview_without_subscription_skips_the_proxy() {
        let mut repo = MockRepository::new();
        repo.expect_get_company_by_id()
            .returning(|_| Ok(Some(company(None))));

        let api = FakeBilling::default();
        let overview = billing_overview(&repo, &api, &user(&[SERVICE_ACCESS_ROLE]))
            .await
            .unwrap();

        assert_eq!(overview.subscription_status, None);
        assert_eq!(overview.invoice_url, None);
    }
}
