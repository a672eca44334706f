// Data models
use chrono::NaiveDate;

/// A stored food order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub order_id: String,
    pub customer_name: String,
    pub food_item: String,
    pub quantity: u64,
    pub price: f64,
    pub order_date: NaiveDate,
}

/// Fields of an order before an OrderID has been assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub customer_name: String,
    pub food_item: String,
    pub quantity: u64,
    pub price: f64,
    pub order_date: NaiveDate,
}

impl NewOrder {
    pub fn with_id(self, order_id: String) -> Order {
        Order {
            order_id,
            customer_name: self.customer_name,
            food_item: self.food_item,
            quantity: self.quantity,
            price: self.price,
            order_date: self.order_date,
        }
    }
}

/// Partial update of an order. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderUpdate {
    pub customer_name: Option<String>,
    pub food_item: Option<String>,
    pub quantity: Option<u64>,
    pub price: Option<f64>,
    pub order_date: Option<NaiveDate>,
}

impl OrderUpdate {
    /// True when no field was supplied
    pub fn is_empty(&self) -> bool {
        self.customer_name.is_none()
            && self.food_item.is_none()
            && self.quantity.is_none()
            && self.price.is_none()
            && self.order_date.is_none()
    }
}
