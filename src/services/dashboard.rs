use crate::SERVICE_ACCESS_ROLE;
use crate::domain::metrics::DashboardMetrics;
use crate::domain::types::CompanyId;
use crate::models::auth::AuthenticatedUser;
use crate::repository::MetricsReader;
use crate::routes::check_role;
use crate::services::{ServiceError, ServiceResult};

/// Loads the metric cards shown on the dashboard.
pub fn load_metrics<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<DashboardMetrics>
where
    R: MetricsReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    Ok(repo.dashboard_metrics(CompanyId::new(user.company_id)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;

    #[test]
    fn metrics_are_scoped_to_the_user_company() {
        let mut repo = MockRepository::new();
        repo.expect_dashboard_metrics()
            .withf(|company_id| company_id.get() == 7)
            .times(1)
            .returning(|_| {
                Ok(DashboardMetrics {
                    total_clients: 4,
                    ..DashboardMetrics::default()
                })
            });

        let user = AuthenticatedUser {
            sub: "1".to_string(),
            email: "user@example.com".to_string(),
            name: "User".to_string(),
            company_id: 7,
            roles: vec![SERVICE_ACCESS_ROLE.to_string()],
            exp: usize::MAX,
        };

        let metrics = load_metrics(&repo, &user).unwrap();
        assert_eq!(metrics.total_clients, 4);
    }
}
