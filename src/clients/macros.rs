/// Generates `new` plus list/create/get/update methods named after the
/// resource, e.g. `list_dishes`, `create_dish`, `get_dish`, `update_dish`.
macro_rules! impl_resource_client {
    ($client_name:ident, $entity:ty, $singular:ident, $plural:ident) => {
        paste::paste! {
            impl $client_name {
                pub fn new(inner: $crate::actor_framework::ResourceClient<$entity>) -> Self {
                    Self { inner }
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<list_ $plural>](&self) -> Result<Vec<$entity>, $crate::error::ApiError> {
                    tracing::debug!("Sending request");
                    self.inner.list().await
                }

                #[tracing::instrument(skip(self, data))]
                pub async fn [<create_ $singular>](
                    &self,
                    data: $crate::pipeline::Payload,
                ) -> Result<$entity, $crate::error::ApiError> {
                    tracing::debug!("Sending request");
                    self.inner.create(data).await
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $singular>](&self, id: String) -> Result<$entity, $crate::error::ApiError> {
                    tracing::debug!("Sending request");
                    self.inner.get(id).await
                }

                #[tracing::instrument(skip(self, data))]
                pub async fn [<update_ $singular>](
                    &self,
                    id: String,
                    data: $crate::pipeline::Payload,
                ) -> Result<$entity, $crate::error::ApiError> {
                    tracing::debug!("Sending request");
                    self.inner.update(id, data).await
                }
            }
        }
    };
}
