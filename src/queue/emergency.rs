use std::cmp::Reverse;
use chrono::{DateTime, Utc};
use crate::core::types::{EmergencyPriority, EmergencyRequest, EmergencyStatus, StatusUpdate};
use crate::queue::heap::PriorityQueue;
use crate::queue::order::Ascending;

/// Emergency requests, most urgent (priority 1) first.
///
/// Queues built with [`arrival_order`](PriorityQueue::arrival_order) or
/// [`from_requests`](PriorityQueue::from_requests) serve equal priorities in
/// arrival order. `new()` and `default()` leave ties unspecified.
pub type EmergencyQueue = PriorityQueue<EmergencyRequest, u8, Ascending>;

impl PriorityQueue<EmergencyRequest, u8, Ascending> {
    /// Empty queue serving equal priorities first-in first-out
    pub fn arrival_order() -> Self {
        PriorityQueue::stable(Ascending)
    }

    pub fn from_requests<I>(requests: I) -> Self
    where
        I: IntoIterator<Item = EmergencyRequest>,
    {
        let mut queue = EmergencyQueue::arrival_order();
        queue.extend(requests.into_iter().map(|request| {
            let priority = request.priority.value();
            (request, priority)
        }));
        queue
    }

    /// Adds a request under its own priority
    pub fn submit(&mut self, request: EmergencyRequest) {
        let priority = request.priority.value();
        self.enqueue(request, priority);
    }

    /// Sets a request's priority, keeping the payload field and the heap in step
    pub fn set_priority(&mut self, id: &str, priority: EmergencyPriority) -> bool {
        self.change_priority_with(
            |request| request.id == id,
            |request| {
                request.priority = priority;
                priority.value()
            },
        )
    }

    /// One step more urgent; saturates at 1
    pub fn escalate(&mut self, id: &str) -> bool {
        self.change_priority_with(
            |request| request.id == id,
            |request| {
                request.priority = request.priority.escalate();
                request.priority.value()
            },
        )
    }

    /// One step less urgent; saturates at 5
    pub fn deescalate(&mut self, id: &str) -> bool {
        self.change_priority_with(
            |request| request.id == id,
            |request| {
                request.priority = request.priority.deescalate();
                request.priority.value()
            },
        )
    }

    /// Takes a request out of the queue and marks it resolved
    pub fn resolve(&mut self, id: &str, resolved_at: DateTime<Utc>) -> Option<EmergencyRequest> {
        let mut request = self.remove_where(|request| request.id == id)?;
        request.status = EmergencyStatus::Resolved;
        request.resolved_time = Some(resolved_at);
        Some(request)
    }

    /// Requests waiting in the given status, in heap order
    pub fn with_status(&self, status: EmergencyStatus) -> Vec<&EmergencyRequest> {
        self.get_all()
            .into_iter()
            .filter(|request| request.status == status)
            .collect()
    }
}

/// Orders status updates for display: most urgent first, newest first
/// among equal priorities.
pub fn status_feed<I>(updates: I) -> Vec<StatusUpdate>
where
    I: IntoIterator<Item = StatusUpdate>,
{
    let queue: PriorityQueue<StatusUpdate, (u32, Reverse<DateTime<Utc>>)> = updates
        .into_iter()
        .map(|update| {
            let key = (update.priority, Reverse(update.timestamp));
            (update, key)
        })
        .collect();
    queue.into_sorted_vec()
}
