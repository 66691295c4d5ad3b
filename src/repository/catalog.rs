//! Repository implementations for the commercial catalog: plans, coupons and
//! affiliates. These tables are platform-global and do not feed live views.

use diesel::prelude::*;

use crate::domain::billing::{Affiliate, Coupon, NewAffiliate, NewCoupon, NewPlan, Plan};
use crate::domain::types::{AffiliateId, CouponId, PlanId};
use crate::models::billing::{
    Affiliate as DbAffiliate, Coupon as DbCoupon, NewAffiliate as DbNewAffiliate,
    NewCoupon as DbNewCoupon, NewPlan as DbNewPlan, Plan as DbPlan,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    AffiliateReader, AffiliateWriter, CouponReader, CouponWriter, DieselRepository, PlanReader,
    PlanWriter,
};

impl PlanReader for DieselRepository {
    fn get_plan_by_id(&self, id: PlanId) -> RepositoryResult<Option<Plan>> {
        use crate::schema::plans;

        let mut conn = self.conn()?;
        let plan = plans::table
            .find(id.get())
            .first::<DbPlan>(&mut conn)
            .optional()?;

        Ok(plan.map(Into::into))
    }

    fn list_plans(&self) -> RepositoryResult<Vec<Plan>> {
        use crate::schema::plans;

        let mut conn = self.conn()?;
        let plans = plans::table
            .order(plans::price_cents.asc())
            .load::<DbPlan>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(plans)
    }
}

impl PlanWriter for DieselRepository {
    fn create_plan(&self, new_plan: &NewPlan) -> RepositoryResult<Plan> {
        use crate::schema::plans;

        let mut conn = self.conn()?;
        let db_new_plan: DbNewPlan = new_plan.into();

        let plan = diesel::insert_into(plans::table)
            .values(&db_new_plan)
            .get_result::<DbPlan>(&mut conn)?;

        Ok(plan.into())
    }

    fn update_plan(&self, id: PlanId, updates: &NewPlan) -> RepositoryResult<Plan> {
        use crate::schema::plans;

        let mut conn = self.conn()?;
        let db_updates: DbNewPlan = updates.into();

        let plan = diesel::update(plans::table.find(id.get()))
            .set(&db_updates)
            .get_result::<DbPlan>(&mut conn)?;

        Ok(plan.into())
    }

    fn delete_plan(&self, id: PlanId) -> RepositoryResult<()> {
        use crate::schema::plans;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(plans::table.find(id.get())).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

impl CouponReader for DieselRepository {
    fn get_coupon_by_code(&self, code: &str) -> RepositoryResult<Option<Coupon>> {
        use crate::schema::coupons;

        let mut conn = self.conn()?;
        let coupon = coupons::table
            .filter(coupons::code.eq(code))
            .first::<DbCoupon>(&mut conn)
            .optional()?;

        Ok(coupon.map(Into::into))
    }

    fn list_coupons(&self) -> RepositoryResult<Vec<(Coupon, Option<Affiliate>)>> {
        use crate::schema::{affiliates, coupons};

        let mut conn = self.conn()?;
        let rows = coupons::table
            .left_join(affiliates::table)
            .order(coupons::created_at.desc())
            .load::<(DbCoupon, Option<DbAffiliate>)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(coupon, affiliate)| (coupon.into(), affiliate.map(Into::into)))
            .collect())
    }
}

impl CouponWriter for DieselRepository {
    fn create_coupon(&self, new_coupon: &NewCoupon) -> RepositoryResult<Coupon> {
        use crate::schema::coupons;

        let mut conn = self.conn()?;
        let db_new_coupon: DbNewCoupon = new_coupon.into();

        let coupon = diesel::insert_into(coupons::table)
            .values(&db_new_coupon)
            .get_result::<DbCoupon>(&mut conn)?;

        Ok(coupon.into())
    }

    fn deactivate_coupon(&self, id: CouponId) -> RepositoryResult<Coupon> {
        use crate::schema::coupons;

        let mut conn = self.conn()?;
        let coupon = diesel::update(coupons::table.find(id.get()))
            .set(coupons::active.eq(false))
            .get_result::<DbCoupon>(&mut conn)?;

        Ok(coupon.into())
    }
}

impl AffiliateReader for DieselRepository {
    fn list_affiliates(&self) -> RepositoryResult<Vec<(Affiliate, Vec<Coupon>)>> {
        use crate::schema::{affiliates, coupons};

        let mut conn = self.conn()?;
        let all_affiliates = affiliates::table
            .order(affiliates::name.asc())
            .load::<DbAffiliate>(&mut conn)?;

        let all_coupons = coupons::table
            .filter(coupons::affiliate_id.is_not_null())
            .load::<DbCoupon>(&mut conn)?;

        Ok(all_affiliates
            .into_iter()
            .map(|affiliate| {
                let owned = all_coupons
                    .iter()
                    .filter(|coupon| coupon.affiliate_id == Some(affiliate.id))
                    .cloned()
                    .map(Into::into)
                    .collect();
                (affiliate.into(), owned)
            })
            .collect())
    }

    fn get_affiliate_by_id(&self, id: AffiliateId) -> RepositoryResult<Option<Affiliate>> {
        use crate::schema::affiliates;

        let mut conn = self.conn()?;
        let affiliate = affiliates::table
            .find(id.get())
            .first::<DbAffiliate>(&mut conn)
            .optional()?;

        Ok(affiliate.map(Into::into))
    }
}

impl AffiliateWriter for DieselRepository {
    fn create_affiliate(&self, new_affiliate: &NewAffiliate) -> RepositoryResult<Affiliate> {
        use crate::schema::affiliates;

        let mut conn = self.conn()?;
        let db_new_affiliate: DbNewAffiliate = new_affiliate.into();

        let affiliate = diesel::insert_into(affiliates::table)
            .values(&db_new_affiliate)
            .get_result::<DbAffiliate>(&mut conn)?;

        Ok(affiliate.into())
    }
}
