//! Session helpers over the read boundaries

use super::boundary::{MenuSource, OrderReader};
use crate::cart::Cart;
use crate::error::Result;
use crate::menu::Catalog;
use crate::reconcile::PersistedOrder;
use crate::storage::CartStorage;
use crate::{MenuItemId, OrderId};
use tracing::debug;

/// Fetch `ids` from the menu boundary into a catalog
pub async fn load_catalog<M: MenuSource + ?Sized>(source: &M, ids: &[MenuItemId]) -> Result<Catalog> {
    let mut catalog = Catalog::new();
    for id in ids {
        catalog.insert(source.get_menu_item(*id).await?);
    }
    debug!(items = catalog.len(), "loaded menu catalog");
    Ok(catalog)
}

/// Start editing an existing order: fetch it and mirror its lines in the
/// cart.
///
/// Returns the persisted order, which is the `persisted` side of the next
/// reconciliation. On error the cart is unchanged.
pub async fn resume_order<R, S>(
    reader: &R,
    catalog: &Catalog,
    cart: &mut Cart<S>,
    order_id: OrderId,
) -> Result<PersistedOrder>
where
    R: OrderReader + ?Sized,
    S: CartStorage,
{
    let order = reader.get_order_with_items(order_id).await?;
    cart.load_persisted(catalog, &order.items)?;
    debug!(order_id, lines = cart.entries().len(), "resumed order for editing");
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::error::OrderError;
    use crate::menu::fixtures::*;
    use crate::menu::MenuItem;
    use crate::money::Money;
    use crate::reconcile::{reconcile, Action, PersistedOption, PersistedOrderItem};
    use crate::storage::MemoryStorage;
    use async_trait::async_trait;

    struct FixedMenu;

    #[async_trait(?Send)]
    impl MenuSource for FixedMenu {
        async fn get_menu_item(&self, id: MenuItemId) -> Result<MenuItem> {
            match id {
                FRIED_RICE => Ok(fried_rice()),
                2 => Ok(iced_tea()),
                other => Err(OrderError::UnknownMenuItem(other)),
            }
        }
    }

    struct FixedOrder(PersistedOrder);

    #[async_trait(?Send)]
    impl OrderReader for FixedOrder {
        async fn get_order_with_items(&self, _order_id: OrderId) -> Result<PersistedOrder> {
            Ok(self.0.clone())
        }
    }

    fn order() -> PersistedOrder {
        PersistedOrder {
            order_id: 7,
            items: vec![PersistedOrderItem {
                order_item_id: 9,
                menu_item_id: FRIED_RICE,
                quantity: 1,
                options: vec![PersistedOption::new(Some(90), SPICE, MILD, Money::ZERO)],
            }],
        }
    }

    #[tokio::test]
    async fn test_load_catalog() {
        let catalog = load_catalog(&FixedMenu, &[FRIED_RICE, 2]).await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(load_catalog(&FixedMenu, &[3]).await.is_err());

        let groups = FixedMenu.get_option_groups(FRIED_RICE).await.unwrap();
        assert_eq!(groups.len(), 2);
    }

    #[tokio::test]
    async fn test_edit_session_round_trip() {
        let catalog = load_catalog(&FixedMenu, &[FRIED_RICE, 2]).await.unwrap();
        let mut cart = Cart::new(MemoryStorage::new(), EngineConfig::default());

        let persisted = resume_order(&FixedOrder(order()), &catalog, &mut cart, 7).await.unwrap();
        assert!(reconcile(&cart.state().configured_items(), &persisted.items).is_empty());

        // Switch Mild to Hot
        let key = cart.entries()[0].key();
        cart.remove_item(&key).unwrap();
        cart.add_item(&fried_rice(), &[pick(HOT)], 1, None).unwrap();

        let instructions = reconcile(&cart.state().configured_items(), &persisted.items);
        assert_eq!(instructions.len(), 1);
        assert_eq!(instructions[0].action, Action::Update);
        assert_eq!(instructions[0].order_item_id, Some(9));
    }
}
