use chrono::Utc;
use serde::Serialize;

use husktrack_clients::{Client, NewClient};
use husktrack_core::{ClientId, OrderId, PurchaseId, TransactionId};
use husktrack_finance::{FinancialTransaction, NewTransaction};
use husktrack_orders::{NewOrder, Order, OrderChannel, OrderStatus};
use husktrack_products::{Product, ProductSku};
use husktrack_purchasing::{NewPurchase, Purchase};
use husktrack_store::{Collection, DocumentStore, ExpectedRevision, Write};

use crate::error::LedgerError;

/// Outcome of [`LedgerCoordinator::record_purchase`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseReceipt {
    pub purchase: Purchase,
    pub transaction: FinancialTransaction,
    /// Human-readable confirmation line for the submitting form.
    pub confirmation: String,
}

/// Outcome of [`LedgerCoordinator::complete_order`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderCompletion {
    pub order: Order,
    /// False when the order was already completed (idempotent no-op).
    pub stock_adjusted: bool,
    pub remaining_stock: i64,
}

/// Per-collection delete counts from [`LedgerCoordinator::reset_all_data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResetSummary {
    pub clients: u64,
    pub local_sales: u64,
    pub exports: u64,
    pub financial_transactions: u64,
}

fn order_collection(channel: OrderChannel) -> Collection {
    match channel {
        OrderChannel::Local => Collection::LocalSales,
        OrderChannel::Export => Collection::Exports,
    }
}

/// Ledger-consistency coordinator.
///
/// Every mutating operation here is one of:
/// - an atomic commit pairing a stock adjustment with its related documents
///   (`record_purchase`, `complete_order`), where every conditional write
///   names the revision read beforehand so nothing applies partially;
/// - a plain single-document write with no stock effect (`create_order`,
///   `update_order_status`, `register_client`, `record_transaction`);
/// - the best-effort `reset_all_data` batch.
///
/// The store handle is injected so tests and entry points decide lifecycle.
#[derive(Debug, Clone)]
pub struct LedgerCoordinator<S> {
    store: S,
}

impl<S: DocumentStore> LedgerCoordinator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn load_product(&self, sku: ProductSku) -> Result<(Product, u64), LedgerError> {
        let doc = self
            .store
            .get(Collection::Products, sku.as_str())?
            .ok_or_else(|| LedgerError::NotFound(format!("product '{sku}' not found")))?;
        let product: Product = doc.to_record().map_err(LedgerError::Store)?;
        Ok((product, doc.revision))
    }

    fn load_client(&self, id: ClientId) -> Result<(Client, u64), LedgerError> {
        let doc = self
            .store
            .get(Collection::Clients, &id.to_string())?
            .ok_or_else(|| LedgerError::NotFound(format!("client '{id}' not found")))?;
        let client: Client = doc.to_record().map_err(LedgerError::Store)?;
        Ok((client, doc.revision))
    }

    fn load_order(
        &self,
        channel: OrderChannel,
        id: OrderId,
    ) -> Result<(Order, u64), LedgerError> {
        let doc = self
            .store
            .get(order_collection(channel), &id.to_string())?
            .ok_or_else(|| LedgerError::NotFound(format!("{channel} order '{id}' not found")))?;
        let order: Order = doc.to_record().map_err(LedgerError::Store)?;
        Ok((order, doc.revision))
    }

    /// Register a client. Plain insert; no stock effect.
    pub fn register_client(&self, input: NewClient) -> Result<Client, LedgerError> {
        let client = input.into_client(ClientId::new(), Utc::now())?;
        self.store.commit(vec![Write::insert(
            Collection::Clients,
            client.id.to_string(),
            &client,
        )?])?;
        Ok(client)
    }

    /// Create a sales or export order in `To-do`. Plain insert; the client's
    /// cached aggregates are bumped best-effort afterwards (informational
    /// only, so a failure there logs and does not fail the order).
    pub fn create_order(
        &self,
        channel: OrderChannel,
        input: NewOrder,
    ) -> Result<Order, LedgerError> {
        let (mut client, client_revision) = self.load_client(input.client_id)?;
        self.load_product(input.sku)?;

        let order = input.into_order(OrderId::new(), channel, Utc::now())?;
        self.store.commit(vec![Write::insert(
            order_collection(channel),
            order.id.to_string(),
            &order,
        )?])?;

        client.note_order(order.total_amount(), order.created_at);
        let aggregate_update = Write::put(
            Collection::Clients,
            client.id.to_string(),
            &client,
            ExpectedRevision::Revision(client_revision),
        )
        .and_then(|w| self.store.commit(vec![w]));
        if let Err(e) = aggregate_update {
            tracing::warn!(
                client_id = %client.id,
                error = %e,
                "client aggregate update skipped; cached totals may lag"
            );
        }

        tracing::info!(order_id = %order.id, channel = %channel, sku = %order.sku, "order created");
        Ok(order)
    }

    /// Record a coconut purchase: one atomic commit inserting the purchase,
    /// inserting the paired expense transaction, and raising the product's
    /// stock by the purchased quantity. Applied together or not at all.
    pub fn record_purchase(&self, input: NewPurchase) -> Result<PurchaseReceipt, LedgerError> {
        self.load_client(input.supplier_id)?;
        let (mut product, product_revision) = self.load_product(input.sku)?;

        let purchase = input.into_purchase(PurchaseId::new(), Utc::now())?;
        let transaction = FinancialTransaction::expense(
            TransactionId::new(),
            purchase.total_cost(),
            product.name.clone(),
            format!("purchase of {} x {}", purchase.quantity, product.name),
            purchase.created_at,
        );

        product.stock = product.adjusted_stock(purchase.quantity)?;

        self.store.commit(vec![
            Write::insert(
                Collection::CoconutPurchases,
                purchase.id.to_string(),
                &purchase,
            )?,
            Write::insert(
                Collection::FinancialTransactions,
                transaction.id.to_string(),
                &transaction,
            )?,
            Write::put(
                Collection::Products,
                product.sku.as_str(),
                &product,
                ExpectedRevision::Revision(product_revision),
            )?,
        ])?;

        tracing::info!(
            purchase_id = %purchase.id,
            sku = %purchase.sku,
            quantity = purchase.quantity,
            stock = product.stock,
            "purchase recorded"
        );

        let confirmation = format!(
            "Recorded purchase of {} x {}; stock is now {}",
            purchase.quantity, product.name, product.stock
        );
        Ok(PurchaseReceipt {
            purchase,
            transaction,
            confirmation,
        })
    }

    /// Complete a sales or export order: one atomic commit lowering the
    /// product's stock and marking the order `Completed`.
    ///
    /// Both writes are conditioned on the revisions read in this call, so the
    /// already-completed check effectively sits inside the atomic unit: a
    /// racing completion bumps the order revision and the loser conflicts
    /// with no writes. Completing an already-completed order is a no-op.
    pub fn complete_order(
        &self,
        channel: OrderChannel,
        order_id: OrderId,
    ) -> Result<OrderCompletion, LedgerError> {
        let (mut order, order_revision) = self.load_order(channel, order_id)?;
        let (mut product, product_revision) = self.load_product(order.sku)?;

        if order.is_completed() {
            return Ok(OrderCompletion {
                remaining_stock: product.stock,
                order,
                stock_adjusted: false,
            });
        }

        if !product.can_fulfill(order.quantity) {
            return Err(LedgerError::InsufficientStock {
                available: product.stock,
                requested: order.quantity,
            });
        }

        product.stock = product.adjusted_stock(-order.quantity)?;
        order.status = OrderStatus::Completed;

        self.store.commit(vec![
            Write::put(
                order_collection(channel),
                order.id.to_string(),
                &order,
                ExpectedRevision::Revision(order_revision),
            )?,
            Write::put(
                Collection::Products,
                product.sku.as_str(),
                &product,
                ExpectedRevision::Revision(product_revision),
            )?,
        ])?;

        tracing::info!(
            order_id = %order.id,
            channel = %channel,
            sku = %order.sku,
            quantity = order.quantity,
            stock = product.stock,
            "order completed"
        );

        Ok(OrderCompletion {
            remaining_stock: product.stock,
            order,
            stock_adjusted: true,
        })
    }

    /// Plain status update for non-`Completed` targets. Setting `Completed`
    /// through this path is rejected so stock only moves through
    /// [`Self::complete_order`]. Reverting an order away from `Completed`
    /// does NOT restore stock; that path is flagged loudly instead.
    pub fn update_order_status(
        &self,
        channel: OrderChannel,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, LedgerError> {
        if status == OrderStatus::Completed {
            let mut errors = husktrack_core::FieldErrors::new();
            errors.push("status", "use the complete operation to finish an order");
            return Err(LedgerError::Validation(errors));
        }

        let (mut order, _) = self.load_order(channel, order_id)?;

        if order.is_completed() {
            tracing::warn!(
                order_id = %order.id,
                channel = %channel,
                new_status = %status,
                "order reverted away from completed; stock is NOT restored"
            );
        }

        order.status = status;
        let payload = serde_json::to_value(&order)
            .map_err(|e| LedgerError::Store(husktrack_store::StoreError::Serialization(e.to_string())))?;
        self.store
            .put_plain(order_collection(channel), &order.id.to_string(), payload)?;
        Ok(order)
    }

    /// Record a manual income/expense ledger entry. Plain insert.
    pub fn record_transaction(
        &self,
        input: NewTransaction,
    ) -> Result<FinancialTransaction, LedgerError> {
        let transaction = input.into_transaction(TransactionId::new(), Utc::now())?;
        self.store.commit(vec![Write::insert(
            Collection::FinancialTransactions,
            transaction.id.to_string(),
            &transaction,
        )?])?;
        Ok(transaction)
    }

    /// Wipe the transactional collections and zero every product's stock.
    /// Best-effort batched writes; no cross-collection transaction guarantee
    /// is required or provided.
    pub fn reset_all_data(&self) -> Result<ResetSummary, LedgerError> {
        let summary = ResetSummary {
            clients: self.store.clear(Collection::Clients)?,
            local_sales: self.store.clear(Collection::LocalSales)?,
            exports: self.store.clear(Collection::Exports)?,
            financial_transactions: self.store.clear(Collection::FinancialTransactions)?,
        };

        for doc in self.store.list(Collection::Products)? {
            let mut product: Product = doc.to_record().map_err(LedgerError::Store)?;
            product.stock = 0;
            let payload = serde_json::to_value(&product).map_err(|e| {
                LedgerError::Store(husktrack_store::StoreError::Serialization(e.to_string()))
            })?;
            self.store
                .put_plain(Collection::Products, product.sku.as_str(), payload)?;
        }

        tracing::info!(?summary, "all data reset");
        Ok(summary)
    }
}
