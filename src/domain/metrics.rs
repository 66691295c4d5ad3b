use serde::Serialize;

/// Aggregated counters shown on the dashboard landing page.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Default)]
pub struct DashboardMetrics {
    pub total_clients: i64,
    /// Chats not yet at the `Finalizado` stage.
    pub open_chats: i64,
    pub chats_today: i64,
    pub finished_today: i64,
    pub active_products: i64,
}
