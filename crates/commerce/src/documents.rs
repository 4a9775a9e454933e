//! GraphQL documents issued against the admin API.
//!
//! Every document is a named operation; the name doubles as the dispatch key
//! for [`crate::InMemoryCommerce`] and as a log field.

/// Ownership lookup: id and tag set only.
pub const ORDER_TAGS: &str = r#"
query OrderTags($id: ID!) {
  order(id: $id) { id tags }
}
"#;

pub const ORDER_DETAIL: &str = r#"
query OrderDetail($id: ID!) {
  order(id: $id) {
    id
    name
    totalDiscountsSet { shopMoney { amount currencyCode } }
    currentTotalPriceSet { shopMoney { amount currencyCode } }
    lineItems(first: 20) {
      edges {
        node {
          id
          title
          quantity
          discountedTotalSet { shopMoney { amount currencyCode } }
          originalTotalSet { shopMoney { amount currencyCode } }
        }
      }
    }
  }
}
"#;

/// Newest-first page of orders matching a search query such as `tag:alice`.
pub const ORDERS_BY_QUERY: &str = r#"
query MyOrders($first: Int!, $q: String!) {
  orders(first: $first, query: $q, reverse: true) {
    edges {
      node {
        id
        name
        createdAt
        displayFinancialStatus
        tags
        totalPriceSet { shopMoney { amount currencyCode } }
        totalDiscountsSet { shopMoney { amount currencyCode } }
        currentTotalPriceSet { shopMoney { amount currencyCode } }
        lineItems(first: 20) {
          edges {
            node {
              id
              title
              quantity
              originalTotalSet { shopMoney { amount currencyCode } }
              discountedTotalSet { shopMoney { amount currencyCode } }
            }
          }
        }
      }
    }
  }
}
"#;

pub const PRODUCTS: &str = r#"
query Products($first: Int!) {
  products(first: $first) {
    edges {
      node {
        id
        title
        variants(first: 20) {
          edges { node { id title price } }
        }
      }
    }
  }
}
"#;

pub const ORDER_EDIT_BEGIN: &str = r#"
mutation OrderEditBegin($id: ID!) {
  orderEditBegin(id: $id) {
    calculatedOrder {
      id
      lineItems(first: 50) { edges { node { id title quantity } } }
    }
    userErrors { field message }
  }
}
"#;

pub const ORDER_EDIT_ADD_LINE_ITEM_DISCOUNT: &str = r#"
mutation OrderEditAddLineItemDiscount($id: ID!, $lineItemId: ID!, $discount: OrderEditAppliedDiscountInput!) {
  orderEditAddLineItemDiscount(id: $id, lineItemId: $lineItemId, discount: $discount) {
    calculatedOrder { id }
    userErrors { field message }
  }
}
"#;

pub const ORDER_EDIT_SET_QUANTITY: &str = r#"
mutation OrderEditSetQuantity($id: ID!, $lineItemId: ID!, $quantity: Int!) {
  orderEditSetQuantity(id: $id, lineItemId: $lineItemId, quantity: $quantity) {
    calculatedOrder { id }
    userErrors { field message }
  }
}
"#;

pub const ORDER_EDIT_ADD_VARIANT: &str = r#"
mutation OrderEditAddVariant($id: ID!, $variantId: ID!, $quantity: Int!) {
  orderEditAddVariant(id: $id, variantId: $variantId, quantity: $quantity) {
    calculatedOrder { id }
    userErrors { field message }
  }
}
"#;

pub const ORDER_EDIT_COMMIT: &str = r#"
mutation OrderEditCommit($id: ID!, $notifyCustomer: Boolean!) {
  orderEditCommit(id: $id, notifyCustomer: $notifyCustomer) {
    order { id name }
    userErrors { field message }
  }
}
"#;

pub const ORDER_CREATE: &str = r#"
mutation CreateOrder($order: OrderCreateOrderInput!) {
  orderCreate(order: $order) {
    userErrors { field message }
    order { id name }
  }
}
"#;

pub const TAGS_ADD: &str = r#"
mutation AddTag($id: ID!, $tags: [String!]!) {
  tagsAdd(id: $id, tags: $tags) {
    userErrors { field message }
    node { id }
  }
}
"#;

pub const ORDER_MARK_AS_PAID: &str = r#"
mutation MarkPaid($input: OrderMarkAsPaidInput!) {
  orderMarkAsPaid(input: $input) {
    userErrors { field message }
    order { id displayFinancialStatus }
  }
}
"#;

/// Extracts the operation name (`query Name(...)` / `mutation Name {`).
pub fn operation_name(document: &str) -> Option<&str> {
    let mut tokens = document.split_whitespace();
    match tokens.next()? {
        "query" | "mutation" => {}
        _ => return None,
    }
    let raw = tokens.next()?;
    let name = raw
        .split(|c: char| c == '(' || c == '{')
        .next()
        .unwrap_or_default();
    (!name.is_empty()).then_some(name)
}
