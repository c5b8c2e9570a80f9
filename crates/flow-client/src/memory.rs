//! Implementación en memoria del `FlowService`.
//!
//! Cumple el mismo contrato observable que el servicio real: listado
//! ordenado por fecha de creación descendente, timeline paginado cortando
//! cada stream tipado con el mismo offset/limit y mezclando por timestamp,
//! comparación agregada vía `CompareReport`. Sirve para tests y para la
//! demo; también permite seguir agregando eventos a un flow ACTIVE entre
//! fetches, que es el caso que la ventana de páginas debe absorber.
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

use flow_core::CompareReport;
use flow_domain::meta::page_count;
use flow_domain::{AssertionData, AssertionEvent, Flow, FlowStats, FlowStatus, PageMeta, PointData, PointEvent,
                  TimelineEvent, TimelineMeta};

use crate::error::ServiceError;
use crate::service::{FlowBatch, FlowQuery, FlowService, TimelineBatch};

struct StoredFlow {
    flow: Flow,
    points: Vec<PointEvent>,
    assertions: Vec<AssertionEvent>,
}

struct Inner {
    flows: Vec<StoredFlow>,
    next_flow_id: i64,
    next_event_id: i64,
}

pub struct InMemoryFlowService {
    inner: Mutex<Inner>,
}

impl InMemoryFlowService {
    pub fn new() -> Self {
        Self { inner: Mutex::new(Inner { flows: Vec::new(), next_flow_id: 1, next_event_id: 1 }) }
    }

    /// Crea un flow ACTIVE y devuelve su id.
    pub fn insert_flow(&self, name: &str, identifier: Option<&str>, service: Option<&str>) -> i64 {
        let mut inner = self.inner.lock().expect("service lock poisoned");
        let id = inner.next_flow_id;
        inner.next_flow_id += 1;
        inner.flows.push(StoredFlow { flow: Flow { id,
                                                   name: name.to_string(),
                                                   identifier: identifier.map(str::to_string),
                                                   service: service.map(str::to_string),
                                                   status: FlowStatus::Active,
                                                   created_at: Utc::now(),
                                                   updated_at: None,
                                                   point_count: 0,
                                                   assertion_count: 0 },
                                      points: Vec::new(),
                                      assertions: Vec::new() });
        id
    }

    pub fn push_point(&self, flow_id: i64, description: &str, expected: Value) -> Result<i64, ServiceError> {
        let mut inner = self.inner.lock().expect("service lock poisoned");
        let id = inner.next_event_id;
        inner.next_event_id += 1;
        let stored = inner.flows
                          .iter_mut()
                          .find(|s| s.flow.id == flow_id)
                          .ok_or(ServiceError::FlowNotFound(flow_id))?;
        let service_name = stored.flow.service.clone().unwrap_or_else(|| "system".to_string());
        stored.points.push(PointEvent { timestamp: Utc::now(),
                                        data: PointData { id,
                                                          description: description.to_string(),
                                                          expected,
                                                          service_name,
                                                          schema: None,
                                                          timeout_ms: None } });
        stored.flow.updated_at = Some(Utc::now());
        Ok(id)
    }

    pub fn push_assertion(&self, flow_id: i64, actual: Value) -> Result<i64, ServiceError> {
        let mut inner = self.inner.lock().expect("service lock poisoned");
        let id = inner.next_event_id;
        inner.next_event_id += 1;
        let stored = inner.flows
                          .iter_mut()
                          .find(|s| s.flow.id == flow_id)
                          .ok_or(ServiceError::FlowNotFound(flow_id))?;
        let service_name = stored.flow.service.clone().unwrap_or_else(|| "system".to_string());
        stored.assertions.push(AssertionEvent { timestamp: Utc::now(),
                                                data: AssertionData { id,
                                                                      actual,
                                                                      service_name,
                                                                      processed_at: None } });
        stored.flow.updated_at = Some(Utc::now());
        Ok(id)
    }

    pub fn set_status(&self, flow_id: i64, status: FlowStatus) -> Result<(), ServiceError> {
        let mut inner = self.inner.lock().expect("service lock poisoned");
        let stored = inner.flows
                          .iter_mut()
                          .find(|s| s.flow.id == flow_id)
                          .ok_or(ServiceError::FlowNotFound(flow_id))?;
        stored.flow.status = status;
        stored.flow.updated_at = Some(Utc::now());
        Ok(())
    }
}

impl Default for InMemoryFlowService {
    fn default() -> Self {
        Self::new()
    }
}

fn matches_search(flow: &Flow, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    flow.name.to_lowercase().contains(&needle)
    || flow.identifier.as_deref().is_some_and(|s| s.to_lowercase().contains(&needle))
    || flow.service.as_deref().is_some_and(|s| s.to_lowercase().contains(&needle))
}

fn page_slice<T: Clone>(items: &[T], offset: usize, limit: usize) -> Vec<T> {
    items.iter().skip(offset).take(limit).cloned().collect()
}

#[async_trait]
impl FlowService for InMemoryFlowService {
    async fn list_flows(&self, query: &FlowQuery) -> Result<FlowBatch, ServiceError> {
        // misma tolerancia que el servicio real: página/limit inválidos se
        // normalizan en lugar de fallar
        let page = query.page.max(1);
        let limit = if query.limit == 0 { 20 } else { query.limit };

        let inner = self.inner.lock().expect("service lock poisoned");
        let mut selected: Vec<Flow> = inner.flows
                                           .iter()
                                           .filter(|s| query.status.map_or(true, |st| s.flow.status == st))
                                           .filter(|s| query.search
                                                            .as_deref()
                                                            .map_or(true, |n| matches_search(&s.flow, n)))
                                           .map(|s| {
                                               let mut f = s.flow.clone();
                                               f.point_count = s.points.len() as u64;
                                               f.assertion_count = s.assertions.len() as u64;
                                               f
                                           })
                                           .collect();
        selected.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = selected.len() as u64;
        let offset = ((page - 1) * limit) as usize;
        let data = page_slice(&selected, offset, limit as usize);

        Ok(FlowBatch { data,
                       meta: PageMeta { page, limit, pages: page_count(total, limit), total } })
    }

    async fn flow_timeline(&self, flow_id: i64, page: u32, limit: u32) -> Result<TimelineBatch, ServiceError> {
        let page = page.max(1);
        let limit = if limit == 0 { 50 } else { limit };

        let inner = self.inner.lock().expect("service lock poisoned");
        let stored = inner.flows
                          .iter()
                          .find(|s| s.flow.id == flow_id)
                          .ok_or(ServiceError::FlowNotFound(flow_id))?;

        let offset = ((page - 1) * limit) as usize;
        let mut data: Vec<TimelineEvent> =
            page_slice(&stored.points, offset, limit as usize).into_iter()
                                                              .map(TimelineEvent::Point)
                                                              .collect();
        data.extend(page_slice(&stored.assertions, offset, limit as usize).into_iter()
                                                                          .map(TimelineEvent::Assertion));
        // orden de persistencia dentro de la página; estable para no
        // reordenar eventos con el mismo timestamp
        data.sort_by_key(|e| e.timestamp());

        let total_points = stored.points.len() as u64;
        let total_assertions = stored.assertions.len() as u64;
        let mut flow = stored.flow.clone();
        flow.point_count = total_points;
        flow.assertion_count = total_assertions;

        Ok(TimelineBatch { flow,
                           data,
                           meta: TimelineMeta { page,
                                                limit,
                                                pages: page_count(total_points, limit),
                                                total_points,
                                                total_assertions } })
    }

    async fn compare_flow(&self, flow_id: i64) -> Result<CompareReport, ServiceError> {
        let inner = self.inner.lock().expect("service lock poisoned");
        let stored = inner.flows
                          .iter()
                          .find(|s| s.flow.id == flow_id)
                          .ok_or(ServiceError::FlowNotFound(flow_id))?;
        Ok(CompareReport::build(&stored.points, &stored.assertions))
    }

    async fn stats(&self) -> Result<FlowStats, ServiceError> {
        let inner = self.inner.lock().expect("service lock poisoned");
        let mut stats = FlowStats::default();
        for s in &inner.flows {
            stats.total_flows += 1;
            match s.flow.status {
                FlowStatus::Active => stats.active_flows += 1,
                FlowStatus::Finished => stats.finished_flows += 1,
                FlowStatus::Interrupted => stats.interrupted_flows += 1,
            }
            stats.total_points += s.points.len() as u64;
            stats.total_assertions += s.assertions.len() as u64;
        }
        Ok(stats)
    }
}
