//! Visitor configuration: depth limit and traversal order

use crate::depth::DepthLimit;
use crate::error::VisitError;
use serde::{Deserialize, Serialize};

/// When a node is dispatched relative to its children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    /// Node before its children
    PreOrder,

    /// Children before the node (bottom-up)
    PostOrder,
}

/// Configuration every visitor declares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisitorSpec {
    /// Deepest types dispatched to the visitor
    pub max_depth: DepthLimit,
    /// Dispatch order
    pub order: Order,
}

impl VisitorSpec {
    /// Spec from both required values
    #[inline]
    #[must_use]
    pub const fn new(max_depth: DepthLimit, order: Order) -> Self {
        Self { max_depth, order }
    }

    /// Builder failing on missing values
    #[inline]
    #[must_use]
    pub fn builder() -> VisitorSpecBuilder {
        VisitorSpecBuilder::default()
    }

    /// Whether the order is [`Order::PreOrder`]
    #[inline]
    #[must_use]
    pub fn is_pre_order(self) -> bool {
        self.order == Order::PreOrder
    }

    /// Whether the order is [`Order::PostOrder`]
    #[inline]
    #[must_use]
    pub fn is_post_order(self) -> bool {
        self.order == Order::PostOrder
    }
}

/// Builder for [`VisitorSpec`], used when configuration is assembled piecemeal
#[derive(Debug, Clone, Copy, Default)]
pub struct VisitorSpecBuilder {
    max_depth: Option<DepthLimit>,
    order: Option<Order>,
}

impl VisitorSpecBuilder {
    /// With depth limit
    #[inline]
    #[must_use]
    pub fn max_depth(mut self, max_depth: DepthLimit) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// With order
    #[inline]
    #[must_use]
    pub fn order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    /// Build the spec
    ///
    /// # Errors
    /// `ArgumentRequired` naming the first missing value
    pub fn build(self) -> Result<VisitorSpec, VisitError> {
        let max_depth = self.max_depth.ok_or(VisitError::ArgumentRequired("max_depth"))?;
        let order = self.order.ok_or(VisitError::ArgumentRequired("order"))?;
        Ok(VisitorSpec::new(max_depth, order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_requires_max_depth() {
        let result = VisitorSpec::builder().order(Order::PreOrder).build();
        assert!(matches!(result, Err(VisitError::ArgumentRequired("max_depth"))));
    }

    #[test]
    fn builder_requires_order() {
        let result = VisitorSpec::builder().max_depth(DepthLimit::FILE).build();
        assert!(matches!(result, Err(VisitError::ArgumentRequired("order"))));
    }

    #[test]
    fn builder_builds_complete_spec() {
        let spec = VisitorSpec::builder()
            .max_depth(DepthLimit::MODULE)
            .order(Order::PostOrder)
            .build()
            .unwrap();
        assert_eq!(spec, VisitorSpec::new(DepthLimit::MODULE, Order::PostOrder));
        assert!(spec.is_post_order());
        assert!(!spec.is_pre_order());
    }
}
