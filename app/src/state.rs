use cdcr::connect::rest::RestConnectClient;
use cdcr::container::docker::DockerCli;
use cdcr::error::CdcrResult;
use cdcr::kafka::kafka_client::Kafka;
use cdcr::pipeline::orchestrator::Orchestrator;
use cdcr::pipeline::settings::PipelineSettings;

pub struct AppState {
    pub settings: PipelineSettings,
    pub connect: RestConnectClient,
    pub kafka: Kafka,
    pub runtime: DockerCli,
}

impl AppState {
    pub fn new(settings: PipelineSettings) -> CdcrResult<Self> {
        let connect =
            RestConnectClient::new(&settings.connect.url, settings.connect.request_timeout())?;
        let kafka = Kafka::new(&settings.kafka)?;
        let runtime = DockerCli::new(&settings.runtime.binary);
        Ok(AppState {
            settings,
            connect,
            kafka,
            runtime,
        })
    }

    pub fn orchestrator(&self) -> Orchestrator<'_> {
        Orchestrator::new(&self.settings, &self.connect, &self.kafka, &self.runtime)
    }
}
