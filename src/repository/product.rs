//! Repository implementation for catalog products.

use diesel::prelude::*;

use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::types::{CompanyId, ProductId};
use crate::live::{ChangeOp, EntityKind};
use crate::models::product::{
    NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ProductReader, ProductWriter};

impl ProductReader for DieselRepository {
    fn get_product_by_id(
        &self,
        id: ProductId,
        company_id: CompanyId,
    ) -> RepositoryResult<Option<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .find(id.get())
            .filter(products::company_id.eq(company_id.get()))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(product.map(Into::into))
    }

    fn list_products(&self, company_id: CompanyId) -> RepositoryResult<Vec<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let products = products::table
            .filter(products::company_id.eq(company_id.get()))
            .order(products::name.asc())
            .load::<DbProduct>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(products)
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_new_product: DbNewProduct = new_product.into();

        let product: Product = diesel::insert_into(products::table)
            .values(&db_new_product)
            .get_result::<DbProduct>(&mut conn)?
            .into();

        if let Ok(company_id) = CompanyId::new(product.company_id) {
            self.notify(company_id, EntityKind::Product, ChangeOp::Insert);
        }
        Ok(product)
    }

    fn update_product(
        &self,
        id: ProductId,
        company_id: CompanyId,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateProduct = updates.into();

        let product: Product = diesel::update(
            products::table
                .find(id.get())
                .filter(products::company_id.eq(company_id.get())),
        )
        .set(&db_updates)
        .get_result::<DbProduct>(&mut conn)?
        .into();

        self.notify(company_id, EntityKind::Product, ChangeOp::Update);
        Ok(product)
    }

    fn delete_product(&self, id: ProductId, company_id: CompanyId) -> RepositoryResult<()> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            products::table
                .find(id.get())
                .filter(products::company_id.eq(company_id.get())),
        )
        .execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.notify(company_id, EntityKind::Product, ChangeOp::Delete);
        Ok(())
    }
}
